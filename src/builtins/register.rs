//! Utilities for registering application commands

use std::collections::HashMap;

use crate::serenity_prelude as serenity;

/// Collects all commands into a [`Vec<serenity::CreateApplicationCommand>`] builder, which can be
/// used to register the commands on Discord.
///
/// Subcommands of each command group are taken from `subcommands`, keyed by the group's name.
/// A group without entry is registered without subcommands (and logs a warning).
///
/// ```rust,no_run
/// # use interaction_commands::serenity_prelude as serenity;
/// # use std::collections::HashMap;
/// # async fn foo(
/// #     http: &serenity::Http,
/// #     commands: &[interaction_commands::CommandDefinition<(), ()>],
/// #     subcommands: &HashMap<String, Vec<interaction_commands::Subcommand<(), ()>>>,
/// # ) -> Result<(), serenity::Error> {
/// let create_commands = interaction_commands::builtins::create_application_commands(commands, subcommands);
///
/// serenity::model::application::command::Command::set_global_application_commands(http, |b| {
///     b.set_application_commands(create_commands)
/// })
/// .await?;
/// # Ok(()) }
/// ```
pub fn create_application_commands<U, E>(
    commands: &[crate::CommandDefinition<U, E>],
    subcommands: &HashMap<String, Vec<crate::Subcommand<U, E>>>,
) -> Vec<serenity::CreateApplicationCommand> {
    for group_name in subcommands.keys() {
        let has_group = commands
            .iter()
            .any(|command| command.contains_subcommands() && command.name() == group_name);
        if !has_group {
            log::warn!(
                "subcommands registered for `{}`, but there is no command group of that name",
                group_name
            );
        }
    }

    commands
        .iter()
        .map(|command| match command {
            crate::CommandDefinition::Command(command) => command.create_as_application_command(),
            crate::CommandDefinition::WithSubcommands(group) => {
                let subcommands = subcommands
                    .get(&group.metadata.name)
                    .map_or(&[][..], Vec::as_slice);
                group.create_as_application_command(subcommands)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Command, CommandMetadata, CommandWithSubcommands, Subcommand};

    type Error = String;

    fn noop(_: crate::ApplicationContext<'_, ()>) -> crate::BoxFuture<'_, Result<(), Error>> {
        Box::pin(async { Ok(()) })
    }

    fn noop_message(
        _: crate::ApplicationContext<'_, ()>,
        _: serenity::Message,
    ) -> crate::BoxFuture<'_, Result<(), Error>> {
        Box::pin(async { Ok(()) })
    }

    #[test]
    fn test_create_application_commands() {
        let commands: Vec<crate::CommandDefinition<(), Error>> = vec![
            Command::chat_input(CommandMetadata::new("ping", "Pong"), Vec::new(), noop).into(),
            Command::message(CommandMetadata::new("Quote", ""), noop_message).into(),
            CommandWithSubcommands::new(CommandMetadata::new("tags", "Manage tags")).into(),
        ];
        let mut subcommands = HashMap::new();
        subcommands.insert(
            "tags".to_owned(),
            vec![Subcommand::new("list", "Lists all tags", Vec::new(), noop)],
        );

        let builders = create_application_commands(&commands, &subcommands);
        assert_eq!(builders.len(), 3);
        assert_eq!(builders[0].0["name"], "ping");
        assert_eq!(builders[1].0["type"], 3);
        assert_eq!(builders[2].0["options"][0]["name"], "list");
    }
}
