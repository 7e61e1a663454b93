//! Plain data structs that define the shape of commands, their options and handler contexts

mod command;
pub use command::*;

mod subcommand;
pub use subcommand::*;

mod option;
pub use option::*;

mod context;
pub use context::*;

mod invocation_error;
pub use invocation_error::*;

mod option_value;
pub use option_value::*;

#[cfg(test)]
pub(crate) mod fixtures;
