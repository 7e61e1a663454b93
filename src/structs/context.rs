//! Contexts passed to command and autocomplete handlers

use std::collections::HashMap;

use crate::serenity_prelude as serenity;

/// Context passed to chat input and context menu command handlers.
#[derive(derivative::Derivative)]
#[derivative(Debug(bound = ""))]
pub struct ApplicationContext<'a, U> {
    /// Serenity's context, like HTTP or cache
    #[derivative(Debug = "ignore")]
    pub discord: &'a serenity::Context,
    /// The interaction which triggered this command execution.
    pub interaction: &'a serenity::ApplicationCommandInteraction,
    /// Your custom user data
    #[derivative(Debug = "ignore")]
    pub data: &'a U,
}
impl<U> Clone for ApplicationContext<'_, U> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<U> Copy for ApplicationContext<'_, U> {}

impl<'a, U> ApplicationContext<'a, U> {
    /// Creates a new context for the given interaction
    pub fn new(
        discord: &'a serenity::Context,
        interaction: &'a serenity::ApplicationCommandInteraction,
        data: &'a U,
    ) -> Self {
        Self {
            discord,
            interaction,
            data,
        }
    }

    /// Top-level options the user filled in.
    ///
    /// For subcommands, this is the option list of the invoked subcommand, not the single
    /// `SubCommand` option wrapping it.
    pub fn options(self) -> &'a [serenity::CommandDataOption] {
        innermost_options(&self.interaction.data.options)
    }

    /// The options the user filled in, as typed values keyed by option name.
    ///
    /// For subcommands, these are the options of the invoked subcommand.
    pub fn option_values(self) -> HashMap<&'a str, crate::OptionValue> {
        super::option_value::option_values(self.options())
    }

    /// Name of the invoked subcommand, if the command groups subcommands
    pub fn invoked_subcommand(self) -> Option<&'a str> {
        subcommand_name(&self.interaction.data.options)
    }

    /// The locale of the invoking user, as sent by Discord
    pub fn locale(self) -> &'a str {
        &self.interaction.locale
    }
}

/// Context passed to autocomplete handlers.
#[derive(derivative::Derivative)]
#[derivative(Debug(bound = ""))]
pub struct AutocompleteContext<'a, U> {
    /// Serenity's context, like HTTP or cache
    #[derivative(Debug = "ignore")]
    pub discord: &'a serenity::Context,
    /// The autocomplete interaction sent while the user is typing
    pub interaction: &'a serenity::AutocompleteInteraction,
    /// Your custom user data
    #[derivative(Debug = "ignore")]
    pub data: &'a U,
}
impl<U> Clone for AutocompleteContext<'_, U> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<U> Copy for AutocompleteContext<'_, U> {}

impl<'a, U> AutocompleteContext<'a, U> {
    /// Creates a new context for the given autocomplete interaction
    pub fn new(
        discord: &'a serenity::Context,
        interaction: &'a serenity::AutocompleteInteraction,
        data: &'a U,
    ) -> Self {
        Self {
            discord,
            interaction,
            data,
        }
    }

    /// The option the user is currently typing into, if Discord marked one as focused
    pub fn focused_option(self) -> Option<&'a serenity::CommandDataOption> {
        find_focused(&self.interaction.data.options)
    }

    /// The partial input of the focused option, if it is a string
    pub fn partial_input(self) -> Option<&'a str> {
        self.focused_option()?.value.as_ref()?.as_str()
    }

    /// Name of the subcommand the user is typing options of, if the command groups subcommands
    pub fn invoked_subcommand(self) -> Option<&'a str> {
        subcommand_name(&self.interaction.data.options)
    }

    /// The locale of the invoking user, as sent by Discord
    pub fn locale(self) -> &'a str {
        &self.interaction.locale
    }
}

/// Descends through `SubCommand`/`SubCommandGroup` wrappers to the options of the invoked leaf
fn innermost_options(
    options: &[serenity::CommandDataOption],
) -> &[serenity::CommandDataOption] {
    match options {
        [single]
            if matches!(
                single.kind,
                serenity::CommandOptionType::SubCommand
                    | serenity::CommandOptionType::SubCommandGroup
            ) =>
        {
            innermost_options(&single.options)
        }
        _ => options,
    }
}

/// Name of the `SubCommand` option wrapping the invoked subcommand's options
fn subcommand_name(options: &[serenity::CommandDataOption]) -> Option<&str> {
    match options {
        [single] if single.kind == serenity::CommandOptionType::SubCommand => Some(&single.name),
        _ => None,
    }
}

/// Finds the option marked `focused`, searching nested subcommand options too
fn find_focused(
    options: &[serenity::CommandDataOption],
) -> Option<&serenity::CommandDataOption> {
    options.iter().find_map(|option| {
        if option.focused {
            Some(option)
        } else {
            find_focused(&option.options)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::fixtures;

    #[test]
    fn test_option_values() {
        let discord = fixtures::discord();
        let interaction = fixtures::command_interaction(serde_json::json!({
            "id": "5",
            "name": "tags",
            "type": 1,
            "options": [{
                "name": "add",
                "type": 1,
                "options": [
                    { "name": "tag", "type": 3, "value": "rust" },
                    { "name": "uses", "type": 4, "value": 3 },
                    { "name": "pinned", "type": 5, "value": true },
                    { "name": "owner", "type": 6, "value": "10" }
                ]
            }],
            "resolved": { "users": { "10": fixtures::user_json(10, "ferris") } }
        }));
        let ctx = ApplicationContext::new(&discord, &interaction, &());

        assert_eq!(ctx.invoked_subcommand(), Some("add"));
        assert_eq!(ctx.locale(), "fr");
        assert_eq!(ctx.options().len(), 4);

        let values = ctx.option_values();
        assert_eq!(values.len(), 4);
        assert_eq!(values["tag"].as_str(), Some("rust"));
        assert_eq!(values["uses"].as_i64(), Some(3));
        assert_eq!(values["uses"].as_f64(), Some(3.0));
        assert_eq!(values["pinned"].as_bool(), Some(true));
        assert_eq!(values["owner"].as_user().map(|user| user.name.as_str()), Some("ferris"));
        assert!(values["tag"].as_user().is_none());
    }

    #[test]
    fn test_unresolved_user_is_left_out() {
        let discord = fixtures::discord();
        let interaction = fixtures::command_interaction(serde_json::json!({
            "id": "5",
            "name": "whois",
            "type": 1,
            "options": [{ "name": "user", "type": 6, "value": "10" }]
        }));
        let ctx = ApplicationContext::new(&discord, &interaction, &());

        assert_eq!(ctx.invoked_subcommand(), None);
        assert!(ctx.option_values().is_empty());
    }

    #[test]
    fn test_focused_option() {
        let discord = fixtures::discord();
        let interaction = fixtures::autocomplete_interaction(serde_json::json!({
            "id": "5",
            "name": "tags",
            "type": 1,
            "options": [{
                "name": "add",
                "type": 1,
                "options": [
                    { "name": "category", "type": 3, "value": "lang" },
                    { "name": "tag", "type": 3, "value": "ru", "focused": true }
                ]
            }]
        }));
        let ctx = AutocompleteContext::new(&discord, &interaction, &());

        assert_eq!(ctx.invoked_subcommand(), Some("add"));
        assert_eq!(ctx.focused_option().map(|option| option.name.as_str()), Some("tag"));
        assert_eq!(ctx.partial_input(), Some("ru"));
    }
}
