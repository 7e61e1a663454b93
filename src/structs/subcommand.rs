//! Subcommands, which are registered as options of a [`crate::CommandWithSubcommands`]

use std::collections::HashMap;

use crate::serenity_prelude as serenity;

/// A slash subcommand nested under a [`crate::CommandWithSubcommands`].
///
/// Has the same handler contract as a chat input [`crate::Command`], but no type discriminant:
/// subcommands are always chat input.
#[derive(derivative::Derivative)]
#[derivative(Debug(bound = ""), Clone(bound = ""))]
pub struct Subcommand<U, E> {
    /// Name of the subcommand, typed after the parent command's name
    pub name: String,
    /// Localized names with locale string as the key
    pub name_localizations: HashMap<String, String>,
    /// Short description of the subcommand
    pub description: String,
    /// Localized descriptions with locale string as the key
    pub description_localizations: HashMap<String, String>,
    /// Options the user fills in
    pub options: Vec<crate::CommandOption>,
    /// Invoked when the user runs the subcommand
    #[derivative(Debug = "ignore")]
    pub action: crate::ChatInputAction<U, E>,
    /// Invoked while the user types into an option with `autocomplete` set
    #[derivative(Debug = "ignore")]
    pub autocomplete: Option<crate::AutocompleteAction<U, E>>,
}

impl<U, E> Subcommand<U, E> {
    /// Creates a subcommand without localizations or autocomplete handler
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        options: Vec<crate::CommandOption>,
        action: crate::ChatInputAction<U, E>,
    ) -> Self {
        Self {
            name: name.into(),
            name_localizations: HashMap::new(),
            description: description.into(),
            description_localizations: HashMap::new(),
            options,
            action,
            autocomplete: None,
        }
    }

    /// Creates a subcommand whose name and description are looked up in the given translator
    pub fn localized<T: crate::Translator>(
        translator: &T,
        name_key: &str,
        description_key: &str,
        options: Vec<crate::CommandOption>,
        action: crate::ChatInputAction<U, E>,
    ) -> Result<Self, T::Error> {
        let name = crate::localized_prop(translator, "name", name_key)?;
        let description = crate::localized_prop(translator, "description", description_key)?;
        Ok(Self {
            name: name.value,
            name_localizations: name.localizations,
            description: description.value,
            description_localizations: description.localizations,
            ..Self::new(String::new(), String::new(), options, action)
        })
    }

    /// Sets the autocomplete handler
    pub fn with_autocomplete(mut self, callback: crate::AutocompleteAction<U, E>) -> Self {
        self.autocomplete = Some(callback);
        self
    }

    /// Serializes this subcommand into an application command option, which is the form which
    /// Discord requires subcommands to be in
    pub fn create_as_subcommand_option(&self) -> serenity::CreateApplicationCommandOption {
        if !crate::is_valid_chat_input_name(&self.name) {
            log::warn!(
                "`{}` is not a valid subcommand name, Discord will reject it",
                self.name
            );
        }

        let mut builder = serenity::CreateApplicationCommandOption::default();
        builder
            .kind(serenity::CommandOptionType::SubCommand)
            .name(&self.name)
            .description(&self.description);

        for (locale, name) in &self.name_localizations {
            builder.name_localized(locale, name);
        }
        for (locale, description) in &self.description_localizations {
            builder.description_localized(locale, description);
        }
        for option in &self.options {
            builder.add_sub_option(option.create_as_slash_command_option());
        }

        builder
    }

    /// Runs the subcommand handler
    pub async fn invoke(
        &self,
        ctx: crate::ApplicationContext<'_, U>,
    ) -> Result<(), crate::InvocationError<E>> {
        if ctx.interaction.data.kind != serenity::CommandType::ChatInput {
            return Err(crate::InvocationError::CommandStructureMismatch(
                "subcommand received a context menu interaction",
            ));
        }
        (self.action)(ctx)
            .await
            .map_err(crate::InvocationError::Handler)
    }

    /// Runs the subcommand's own autocomplete handler, if there is one
    pub async fn autocomplete(
        &self,
        ctx: crate::AutocompleteContext<'_, U>,
    ) -> Result<Option<Vec<crate::AutocompleteChoice>>, crate::InvocationError<E>> {
        match self.autocomplete {
            Some(callback) => callback(ctx)
                .await
                .map(Some)
                .map_err(crate::InvocationError::Handler),
            None => Ok(None),
        }
    }
}
