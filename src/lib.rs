#![cfg_attr(doc_nightly, feature(doc_cfg, doc_auto_cfg))]
#![doc(test(attr(deny(deprecated))))]
#![warn(rust_2018_idioms)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![allow(clippy::type_complexity)]
// native #[non_exhaustive] forbids struct update syntax, which TranslatorOptions relies on
#![allow(clippy::manual_non_exhaustive)]

/*!
Typed contracts for Discord application commands, plus helpers to localize their metadata.

Discord knows three kinds of application commands: slash (chat input) commands, and context menu
entries on users and on messages. A slash command either has a handler of its own or only groups
subcommands. This crate models each of those shapes as its own Rust type, so a command that groups
subcommands simply has no place to put a handler, and a context menu command has no place to put
an autocomplete callback.

The crate does not run a bot. Registering the commands on Discord and receiving interactions is
left to your event handler; this crate gives you the registration payloads
([`builtins::create_application_commands`]) and a way to call the right handler for an
interaction ([`CommandDefinition::invoke`], which descends into subcommands of a group).
Handlers read the options the user filled in through [`ApplicationContext::option_values`].

# Defining commands

```rust
use interaction_commands::{ApplicationContext, BoxFuture, Command, CommandMetadata};

type Error = Box<dyn std::error::Error + Send + Sync>;
struct Data;

fn ping(ctx: ApplicationContext<'_, Data>) -> BoxFuture<'_, Result<(), Error>> {
    Box::pin(async move {
        let _ = ctx.interaction;
        Ok(())
    })
}

let command: Command<Data, Error> =
    Command::chat_input(CommandMetadata::new("ping", "Checks that the bot is alive"), Vec::new(), ping);
let builder = command.create_as_application_command();
assert_eq!(builder.0["name"], "ping");
```

# Localization

Command names and descriptions are usually stored in a translation catalog. Use a [`Translator`]
([`Catalog`] for in-memory tables, [`FluentTranslator`] for `.ftl` files) together with
[`localized_prop`] to get the default-locale string and the map of all localizations in one go:

```rust
use interaction_commands::{localized_prop, Catalog};

let mut catalog = Catalog::new("en-US");
catalog.insert("en-US", "cmd.ping.name", "ping");
catalog.insert("fr", "cmd.ping.name", "ping");

let name = localized_prop(&catalog, "name", "cmd.ping.name").unwrap();
assert_eq!(name.value, "ping");
assert_eq!(name.localizations_field_name(), "name_localizations");
assert_eq!(name.localizations.len(), 2);
```

# Serenity prelude
Use `interaction_commands::serenity_prelude` to reach the serenity items used in this crate's
signatures without remembering their full paths.
*/

mod structs;
pub use structs::*;

mod localization;
pub use localization::*;

pub mod builtins;

/// This module re-exports a bunch of items from all over serenity. Useful if you can't
/// remember the full paths of serenity items.
pub mod serenity_prelude {
    #[doc(no_inline)]
    pub use serenity::{
        async_trait,
        builder::*,
        client::{
            bridge::gateway::{event::*, *},
            *,
        },
        collector::*,
        http::*,
        // Explicit imports to resolve ambiguity between model::prelude::* and
        // model::application::interaction::* due to deprecated same-named type aliases
        model::{
            application::interaction::{
                Interaction, InteractionResponseType, InteractionType,
                MessageFlags as InteractionResponseFlags, MessageInteraction,
            },
            channel::MessageFlags,
        },
        model::{
            application::{
                command::*,
                component::*,
                interaction::{
                    application_command::*, autocomplete::*, message_component::*, modal::*, *,
                },
            },
            event::*,
            prelude::*,
        },
        prelude::*,
        utils::*,
        *,
    };
}

use std::future::Future;
use std::pin::Pin;

/// Shorthand for a wrapped async future with a lifetime, used by all command handlers.
///
/// An owned future has the `'static` lifetime.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
