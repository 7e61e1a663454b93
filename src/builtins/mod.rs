//! Building blocks around command definitions: collecting registration payloads and answering
//! autocomplete interactions

mod register;
pub use register::*;

mod autocomplete;
pub use autocomplete::*;
