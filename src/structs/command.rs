//! Top-level command shapes: leaf commands, commands grouping subcommands, and their metadata

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::{serenity_prelude as serenity, BoxFuture};

/// Handler of a chat input command or subcommand
pub type ChatInputAction<U, E> =
    for<'a> fn(crate::ApplicationContext<'a, U>) -> BoxFuture<'a, Result<(), E>>;

/// Handler of a user context menu command, receiving the user that was clicked on
pub type UserAction<U, E> =
    for<'a> fn(crate::ApplicationContext<'a, U>, serenity::User) -> BoxFuture<'a, Result<(), E>>;

/// Handler of a message context menu command, receiving the message that was clicked on
pub type MessageAction<U, E> = for<'a> fn(
    crate::ApplicationContext<'a, U>,
    serenity::Message,
) -> BoxFuture<'a, Result<(), E>>;

/// Generates suggestions while the user types into an autocomplete-enabled option
pub type AutocompleteAction<U, E> = for<'a> fn(
    crate::AutocompleteContext<'a, U>,
) -> BoxFuture<'a, Result<Vec<crate::AutocompleteChoice>, E>>;

/// Discord's rule for chat input command and option names
static CHAT_INPUT_NAME: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"^[-_\p{L}\p{N}\p{Devanagari}\p{Thai}]{1,32}$")
        .expect("hardcoded regex is valid")
});

/// Whether Discord accepts `name` as the name of a chat input command, subcommand or option.
///
/// Context menu command names are freer (spaces and upper case are allowed) and aren't checked by
/// this function.
pub fn is_valid_chat_input_name(name: &str) -> bool {
    CHAT_INPUT_NAME.is_match(name) && name.to_lowercase() == name
}

/// The interaction kind a leaf command is registered as
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CommandType {
    /// Slash command, typed into the chat input
    ChatInput,
    /// Context menu entry on a user
    User,
    /// Context menu entry on a message
    Message,
}

impl CommandType {
    /// The serenity command type this registers as
    pub fn as_serenity(self) -> serenity::CommandType {
        match self {
            Self::ChatInput => serenity::CommandType::ChatInput,
            Self::User => serenity::CommandType::User,
            Self::Message => serenity::CommandType::Message,
        }
    }
}

/// Registration metadata of a top-level command
#[derive(Clone, Debug, PartialEq)]
pub struct CommandMetadata {
    /// Name of the command. For context menu commands, this is the label of the menu entry
    pub name: String,
    /// Localized names with locale string as the key
    pub name_localizations: HashMap<String, String>,
    /// Short description of the command. Not sent for context menu commands
    pub description: String,
    /// Localized descriptions with locale string as the key
    pub description_localizations: HashMap<String, String>,
    /// Permissions which users must have to see and invoke this command.
    ///
    /// `None` leaves the decision to guild admins.
    pub default_member_permissions: Option<serenity::Permissions>,
    /// Whether the command is available in DMs with the bot. `None` keeps Discord's default
    pub dm_permission: Option<bool>,
}

impl CommandMetadata {
    /// Creates metadata without localizations or permission settings
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            name_localizations: HashMap::new(),
            description: description.into(),
            description_localizations: HashMap::new(),
            default_member_permissions: None,
            dm_permission: None,
        }
    }

    /// Creates metadata whose name and description are looked up in the given translator
    ///
    /// ```rust
    /// # use interaction_commands::{Catalog, CommandMetadata};
    /// let mut catalog = Catalog::new("en-US");
    /// catalog.insert("en-US", "ping.name", "ping");
    /// catalog.insert("en-US", "ping.description", "Checks the latency");
    /// catalog.insert("de", "ping.description", "Prüft die Latenz");
    ///
    /// let metadata = CommandMetadata::localized(&catalog, "ping.name", "ping.description").unwrap();
    /// assert_eq!(metadata.description, "Checks the latency");
    /// assert_eq!(metadata.description_localizations["de"], "Prüft die Latenz");
    /// ```
    pub fn localized<T: crate::Translator>(
        translator: &T,
        name_key: &str,
        description_key: &str,
    ) -> Result<Self, T::Error> {
        let name = crate::localized_prop(translator, "name", name_key)?;
        let description = crate::localized_prop(translator, "description", description_key)?;
        Ok(Self::new(String::new(), String::new())
            .with_localized_name(name)
            .with_localized_description(description))
    }

    /// Replaces name and name localizations with the given localized pair
    pub fn with_localized_name(mut self, name: crate::LocalizedProp) -> Self {
        self.name = name.value;
        self.name_localizations = name.localizations;
        self
    }

    /// Replaces description and description localizations with the given localized pair
    pub fn with_localized_description(mut self, description: crate::LocalizedProp) -> Self {
        self.description = description.value;
        self.description_localizations = description.localizations;
        self
    }

    /// Fills the fields shared by all command types into the given builder
    fn apply<'a>(
        &self,
        builder: &'a mut serenity::CreateApplicationCommand,
        kind: CommandType,
    ) -> &'a mut serenity::CreateApplicationCommand {
        if kind == CommandType::ChatInput && !is_valid_chat_input_name(&self.name) {
            log::warn!(
                "`{}` is not a valid chat input command name, Discord will reject it",
                self.name
            );
        }

        builder.name(&self.name).kind(kind.as_serenity());
        for (locale, name) in &self.name_localizations {
            builder.name_localized(locale, name);
        }

        // Context menu commands must be registered with an empty description
        if kind == CommandType::ChatInput {
            builder.description(&self.description);
            for (locale, description) in &self.description_localizations {
                builder.description_localized(locale, description);
            }
        }

        // This is_empty check is needed because Discord special cases empty
        // default_member_permissions to mean "admin-only"
        if let Some(permissions) = self.default_member_permissions {
            if !permissions.is_empty() {
                builder.default_member_permissions(permissions);
            }
        }
        if let Some(dm_permission) = self.dm_permission {
            builder.dm_permission(dm_permission);
        }

        builder
    }
}

/// Interaction kind of a leaf command together with the handler matching it
#[derive(derivative::Derivative)]
#[derivative(Debug(bound = ""))]
pub enum CommandKind<U, E> {
    /// Slash command
    ChatInput {
        /// Options the user fills in
        options: Vec<crate::CommandOption>,
        /// Invoked when the user runs the command
        #[derivative(Debug = "ignore")]
        action: ChatInputAction<U, E>,
        /// Invoked while the user types into an option with `autocomplete` set
        #[derivative(Debug = "ignore")]
        autocomplete: Option<AutocompleteAction<U, E>>,
    },
    /// Context menu entry on a user
    User(#[derivative(Debug = "ignore")] UserAction<U, E>),
    /// Context menu entry on a message
    Message(#[derivative(Debug = "ignore")] MessageAction<U, E>),
}
impl<U, E> Clone for CommandKind<U, E> {
    fn clone(&self) -> Self {
        match self {
            Self::ChatInput {
                options,
                action,
                autocomplete,
            } => Self::ChatInput {
                options: options.clone(),
                action: *action,
                autocomplete: *autocomplete,
            },
            Self::User(action) => Self::User(*action),
            Self::Message(action) => Self::Message(*action),
        }
    }
}

impl<U, E> CommandKind<U, E> {
    /// The discriminant of this kind
    pub fn command_type(&self) -> CommandType {
        match self {
            Self::ChatInput { .. } => CommandType::ChatInput,
            Self::User(_) => CommandType::User,
            Self::Message(_) => CommandType::Message,
        }
    }
}

/// A command with a handler of its own and no subcommands
#[derive(derivative::Derivative)]
#[derivative(Debug(bound = ""), Clone(bound = ""))]
pub struct Command<U, E> {
    /// Registration metadata
    pub metadata: CommandMetadata,
    /// Interaction kind, options and handlers
    pub kind: CommandKind<U, E>,
}

impl<U, E> Command<U, E> {
    /// Creates a slash command
    pub fn chat_input(
        metadata: CommandMetadata,
        options: Vec<crate::CommandOption>,
        action: ChatInputAction<U, E>,
    ) -> Self {
        Self {
            metadata,
            kind: CommandKind::ChatInput {
                options,
                action,
                autocomplete: None,
            },
        }
    }

    /// Creates a context menu command on users
    pub fn user(metadata: CommandMetadata, action: UserAction<U, E>) -> Self {
        Self {
            metadata,
            kind: CommandKind::User(action),
        }
    }

    /// Creates a context menu command on messages
    pub fn message(metadata: CommandMetadata, action: MessageAction<U, E>) -> Self {
        Self {
            metadata,
            kind: CommandKind::Message(action),
        }
    }

    /// Sets the autocomplete handler of a slash command.
    ///
    /// Context menu commands have no options to autocomplete, so this is a no-op on them (with a
    /// warning).
    pub fn with_autocomplete(mut self, callback: AutocompleteAction<U, E>) -> Self {
        match &mut self.kind {
            CommandKind::ChatInput { autocomplete, .. } => *autocomplete = Some(callback),
            CommandKind::User(_) | CommandKind::Message(_) => log::warn!(
                "ignoring autocomplete handler on context menu command `{}`",
                self.metadata.name
            ),
        }
        self
    }

    /// The discriminant of this command
    pub fn command_type(&self) -> CommandType {
        self.kind.command_type()
    }

    /// Generates an application command builder from this [`Command`] instance. This can be used
    /// to register this command on Discord's servers
    pub fn create_as_application_command(&self) -> serenity::CreateApplicationCommand {
        let mut builder = serenity::CreateApplicationCommand::default();
        self.metadata.apply(&mut builder, self.command_type());

        if let CommandKind::ChatInput {
            options,
            autocomplete,
            ..
        } = &self.kind
        {
            crate::builtins::warn_on_autocomplete_mismatch(
                &self.metadata.name,
                options,
                autocomplete.is_some(),
            );
            for option in options {
                builder.add_option(option.create_as_slash_command_option());
            }
        }

        builder
    }

    /// Runs the handler matching this command's kind for the given interaction.
    ///
    /// For context menu commands, the clicked user or message is taken from the interaction's
    /// resolved data.
    pub async fn invoke(
        &self,
        ctx: crate::ApplicationContext<'_, U>,
    ) -> Result<(), crate::InvocationError<E>> {
        let interaction_kind = ctx.interaction.data.kind;
        if interaction_kind != self.command_type().as_serenity() {
            return Err(crate::InvocationError::CommandStructureMismatch(
                "received interaction type doesn't match the command type",
            ));
        }

        let result = match &self.kind {
            CommandKind::ChatInput { action, .. } => action(ctx).await,
            CommandKind::User(action) => match ctx.interaction.data.target() {
                Some(serenity::ResolvedTarget::User(user, _)) => action(ctx, user).await,
                _ => {
                    return Err(crate::InvocationError::CommandStructureMismatch(
                        "user context menu interaction contained no resolved user",
                    ))
                }
            },
            CommandKind::Message(action) => match ctx.interaction.data.target() {
                Some(serenity::ResolvedTarget::Message(message)) => action(ctx, *message).await,
                _ => {
                    return Err(crate::InvocationError::CommandStructureMismatch(
                        "message context menu interaction contained no resolved message",
                    ))
                }
            },
        };
        result.map_err(crate::InvocationError::Handler)
    }

    /// Runs the autocomplete handler, if this is a slash command which has one
    pub async fn autocomplete(
        &self,
        ctx: crate::AutocompleteContext<'_, U>,
    ) -> Result<Option<Vec<crate::AutocompleteChoice>>, crate::InvocationError<E>> {
        match &self.kind {
            CommandKind::ChatInput {
                autocomplete: Some(callback),
                ..
            } => callback(ctx)
                .await
                .map(Some)
                .map_err(crate::InvocationError::Handler),
            _ => Ok(None),
        }
    }
}

/// A slash command which only groups subcommands.
///
/// It has neither options nor a handler of its own; both live on its [`crate::Subcommand`]s.
/// Trying to give it a handler doesn't compile:
///
/// ```rust,compile_fail
/// # use interaction_commands::{CommandMetadata, CommandWithSubcommands};
/// let group = CommandWithSubcommands::<(), ()> {
///     metadata: CommandMetadata::new("config", "Bot settings"),
///     autocomplete: None,
///     action: |_| Box::pin(async { Ok(()) }),
/// };
/// ```
#[derive(derivative::Derivative)]
#[derivative(Debug(bound = ""), Clone(bound = ""))]
pub struct CommandWithSubcommands<U, E> {
    /// Registration metadata. Options come from the subcommands
    pub metadata: CommandMetadata,
    /// Invoked while the user types into an autocomplete-enabled subcommand option, for
    /// subcommands that don't have their own autocomplete handler
    #[derivative(Debug = "ignore")]
    pub autocomplete: Option<AutocompleteAction<U, E>>,
}

impl<U, E> CommandWithSubcommands<U, E> {
    /// Creates a command group without autocomplete handler
    pub fn new(metadata: CommandMetadata) -> Self {
        Self {
            metadata,
            autocomplete: None,
        }
    }

    /// Sets the autocomplete handler
    pub fn with_autocomplete(mut self, callback: AutocompleteAction<U, E>) -> Self {
        self.autocomplete = Some(callback);
        self
    }

    /// Generates an application command builder from this command group and the subcommands
    /// that belong to it
    pub fn create_as_application_command(
        &self,
        subcommands: &[crate::Subcommand<U, E>],
    ) -> serenity::CreateApplicationCommand {
        let mut builder = serenity::CreateApplicationCommand::default();
        self.metadata.apply(&mut builder, CommandType::ChatInput);

        if subcommands.is_empty() {
            log::warn!(
                "command group `{}` has no subcommands, Discord will show it without any",
                self.metadata.name
            );
        }
        for subcommand in subcommands {
            let has_autocomplete = subcommand.autocomplete.is_some() || self.autocomplete.is_some();
            crate::builtins::warn_on_autocomplete_mismatch(
                &subcommand.name,
                &subcommand.options,
                has_autocomplete,
            );
            builder.add_option(subcommand.create_as_subcommand_option());
        }

        builder
    }

    /// Runs the subcommand the interaction names.
    ///
    /// `subcommands` are the subcommands registered under this group.
    pub async fn invoke(
        &self,
        subcommands: &[crate::Subcommand<U, E>],
        ctx: crate::ApplicationContext<'_, U>,
    ) -> Result<(), crate::InvocationError<E>> {
        let subcommand = ctx
            .invoked_subcommand()
            .and_then(|name| subcommands.iter().find(|subcommand| subcommand.name == name));
        match subcommand {
            Some(subcommand) => subcommand.invoke(ctx).await,
            None => Err(crate::InvocationError::CommandStructureMismatch(
                "interaction names no known subcommand",
            )),
        }
    }

    /// Runs the autocomplete handler of the subcommand the user is typing in, or the group-level
    /// handler if that subcommand has none
    pub async fn autocomplete(
        &self,
        subcommands: &[crate::Subcommand<U, E>],
        ctx: crate::AutocompleteContext<'_, U>,
    ) -> Result<Option<Vec<crate::AutocompleteChoice>>, crate::InvocationError<E>> {
        let subcommand_callback = ctx
            .invoked_subcommand()
            .and_then(|name| subcommands.iter().find(|subcommand| subcommand.name == name))
            .and_then(|subcommand| subcommand.autocomplete);
        match subcommand_callback.or(self.autocomplete) {
            Some(callback) => callback(ctx)
                .await
                .map(Some)
                .map_err(crate::InvocationError::Handler),
            None => Ok(None),
        }
    }
}

/// Any top-level command: either a leaf command or a group of subcommands
#[derive(derivative::Derivative)]
#[derivative(Debug(bound = ""), Clone(bound = ""))]
pub enum CommandDefinition<U, E> {
    /// Command with a handler of its own
    Command(Command<U, E>),
    /// Command which only groups subcommands
    WithSubcommands(CommandWithSubcommands<U, E>),
}

impl<U, E> CommandDefinition<U, E> {
    /// Whether this command groups subcommands
    pub fn contains_subcommands(&self) -> bool {
        matches!(self, Self::WithSubcommands(_))
    }

    /// Registration metadata of this command
    pub fn metadata(&self) -> &CommandMetadata {
        match self {
            Self::Command(command) => &command.metadata,
            Self::WithSubcommands(group) => &group.metadata,
        }
    }

    /// Name of this command
    pub fn name(&self) -> &str {
        &self.metadata().name
    }

    /// Subcommands registered under this command in the map passed to
    /// [`crate::builtins::create_application_commands`]
    fn subcommands<'a>(
        &self,
        subcommands: &'a HashMap<String, Vec<crate::Subcommand<U, E>>>,
    ) -> &'a [crate::Subcommand<U, E>] {
        subcommands
            .get(self.name())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Runs the handler for the interaction, descending into the invoked subcommand for groups
    pub async fn invoke(
        &self,
        subcommands: &HashMap<String, Vec<crate::Subcommand<U, E>>>,
        ctx: crate::ApplicationContext<'_, U>,
    ) -> Result<(), crate::InvocationError<E>> {
        match self {
            Self::Command(command) => command.invoke(ctx).await,
            Self::WithSubcommands(group) => group.invoke(self.subcommands(subcommands), ctx).await,
        }
    }

    /// Runs the matching autocomplete handler, if there is one
    pub async fn autocomplete(
        &self,
        subcommands: &HashMap<String, Vec<crate::Subcommand<U, E>>>,
        ctx: crate::AutocompleteContext<'_, U>,
    ) -> Result<Option<Vec<crate::AutocompleteChoice>>, crate::InvocationError<E>> {
        match self {
            Self::Command(command) => command.autocomplete(ctx).await,
            Self::WithSubcommands(group) => {
                group
                    .autocomplete(self.subcommands(subcommands), ctx)
                    .await
            }
        }
    }
}

impl<U, E> From<Command<U, E>> for CommandDefinition<U, E> {
    fn from(command: Command<U, E>) -> Self {
        Self::Command(command)
    }
}

impl<U, E> From<CommandWithSubcommands<U, E>> for CommandDefinition<U, E> {
    fn from(group: CommandWithSubcommands<U, E>) -> Self {
        Self::WithSubcommands(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structs::fixtures;
    use crate::{CommandOption, InvocationError, OptionType};

    type Error = String;

    fn noop(_: crate::ApplicationContext<'_, ()>) -> BoxFuture<'_, Result<(), Error>> {
        Box::pin(async { Ok(()) })
    }

    fn noop_user(
        _: crate::ApplicationContext<'_, ()>,
        _: serenity::User,
    ) -> BoxFuture<'_, Result<(), Error>> {
        Box::pin(async { Ok(()) })
    }

    fn suggest(
        _: crate::AutocompleteContext<'_, ()>,
    ) -> BoxFuture<'_, Result<Vec<crate::AutocompleteChoice>, Error>> {
        Box::pin(async { Ok(vec![crate::AutocompleteChoice::new("a", "a")]) })
    }

    #[test]
    fn test_chat_input_payload() {
        let mut metadata = CommandMetadata::new("ping", "Checks the latency");
        metadata
            .name_localizations
            .insert("fr".to_owned(), "ping".to_owned());
        metadata.dm_permission = Some(false);

        let command = Command::<(), Error>::chat_input(
            metadata,
            vec![CommandOption::new(OptionType::Boolean, "verbose", "Show details")],
            noop,
        );
        assert_eq!(command.command_type(), CommandType::ChatInput);

        let builder = command.create_as_application_command();
        assert_eq!(builder.0["name"], "ping");
        assert_eq!(builder.0["description"], "Checks the latency");
        assert_eq!(builder.0["type"], 1);
        assert_eq!(builder.0["dm_permission"], false);
        assert_eq!(builder.0["name_localizations"]["fr"], "ping");
        assert_eq!(builder.0["options"][0]["name"], "verbose");
        assert!(!builder.0.contains_key("default_member_permissions"));
    }

    #[test]
    fn test_context_menu_payload() {
        let metadata = CommandMetadata {
            default_member_permissions: Some(serenity::Permissions::empty()),
            ..CommandMetadata::new("Show avatar", "ignored")
        };
        let command = Command::<(), Error>::user(metadata, noop_user).with_autocomplete(suggest);
        assert!(matches!(command.kind, CommandKind::User(_)));

        let builder = command.create_as_application_command();
        assert_eq!(builder.0["name"], "Show avatar");
        assert_eq!(builder.0["type"], 2);
        assert!(!builder.0.contains_key("description"));
        assert!(!builder.0.contains_key("options"));
        assert!(!builder.0.contains_key("default_member_permissions"));
    }

    #[test]
    fn test_definition_discriminant() {
        let leaf: CommandDefinition<(), Error> =
            Command::chat_input(CommandMetadata::new("ping", "Pong"), Vec::new(), noop).into();
        let group: CommandDefinition<(), Error> =
            CommandWithSubcommands::new(CommandMetadata::new("config", "Settings")).into();

        assert!(!leaf.contains_subcommands());
        assert!(group.contains_subcommands());
        assert_eq!(group.name(), "config");
    }

    #[test]
    fn test_chat_input_names() {
        assert!(is_valid_chat_input_name("ping"));
        assert!(is_valid_chat_input_name("set-color_2"));
        assert!(is_valid_chat_input_name("héllo"));
        assert!(!is_valid_chat_input_name("Ping"));
        assert!(!is_valid_chat_input_name("two words"));
        assert!(!is_valid_chat_input_name(""));
        assert!(!is_valid_chat_input_name(&"a".repeat(33)));
    }

    fn fail(_: crate::ApplicationContext<'_, ()>) -> BoxFuture<'_, Result<(), Error>> {
        Box::pin(async { Err("handler failed".to_owned()) })
    }

    /// Echoes the clicked user's name back as error, so tests can see what the handler received
    fn echo_user(
        _: crate::ApplicationContext<'_, ()>,
        user: serenity::User,
    ) -> BoxFuture<'_, Result<(), Error>> {
        Box::pin(async move { Err(user.name) })
    }

    fn echo_message(
        _: crate::ApplicationContext<'_, ()>,
        message: serenity::Message,
    ) -> BoxFuture<'_, Result<(), Error>> {
        Box::pin(async move { Err(message.content) })
    }

    fn suggest_group(
        _: crate::AutocompleteContext<'_, ()>,
    ) -> BoxFuture<'_, Result<Vec<crate::AutocompleteChoice>, Error>> {
        Box::pin(async { Ok(vec![crate::AutocompleteChoice::new("group", "group")]) })
    }

    fn slash_data(name: &str) -> serde_json::Value {
        serde_json::json!({ "id": "5", "name": name, "type": 1 })
    }

    fn handler_error<T: std::fmt::Debug>(result: Result<T, InvocationError<Error>>) -> Error {
        match result {
            Err(InvocationError::Handler(error)) => error,
            other => panic!("expected handler error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invoke_kind_mismatch() {
        let discord = fixtures::discord();
        let interaction = fixtures::command_interaction(slash_data("avatar"));
        let ctx = crate::ApplicationContext::new(&discord, &interaction, &());

        let command = Command::<(), Error>::user(CommandMetadata::new("avatar", ""), echo_user);
        assert!(matches!(
            command.invoke(ctx).await,
            Err(InvocationError::CommandStructureMismatch(_))
        ));

        let metadata = CommandMetadata::new("ping", "Pong");
        let command = Command::<(), Error>::chat_input(metadata, Vec::new(), noop);
        assert!(command.invoke(ctx).await.is_ok());
    }

    #[tokio::test]
    async fn test_invoke_passes_handler_error() {
        let discord = fixtures::discord();
        let interaction = fixtures::command_interaction(slash_data("ping"));
        let ctx = crate::ApplicationContext::new(&discord, &interaction, &());

        let metadata = CommandMetadata::new("ping", "Pong");
        let command = Command::<(), Error>::chat_input(metadata, Vec::new(), fail);
        assert_eq!(handler_error(command.invoke(ctx).await), "handler failed");
    }

    #[tokio::test]
    async fn test_invoke_context_menu_target() {
        let discord = fixtures::discord();
        let interaction = fixtures::command_interaction(serde_json::json!({
            "id": "5",
            "name": "Show avatar",
            "type": 2,
            "target_id": "10",
            "resolved": { "users": { "10": fixtures::user_json(10, "ferris") } }
        }));
        let ctx = crate::ApplicationContext::new(&discord, &interaction, &());

        let metadata = CommandMetadata::new("Show avatar", "");
        let command = Command::<(), Error>::user(metadata, echo_user);
        assert_eq!(handler_error(command.invoke(ctx).await), "ferris");

        let metadata = CommandMetadata::new("Quote", "");
        let command = Command::<(), Error>::message(metadata, echo_message);
        let interaction = fixtures::command_interaction(serde_json::json!({
            "id": "6",
            "name": "Quote",
            "type": 3,
            "target_id": "11",
            "resolved": { "messages": { "11": fixtures::message_json(11, "hello there") } }
        }));
        let ctx = crate::ApplicationContext::new(&discord, &interaction, &());
        assert_eq!(handler_error(command.invoke(ctx).await), "hello there");

        // The message was never sent along, so there is nothing to hand to the handler
        let interaction = fixtures::command_interaction(serde_json::json!({
            "id": "7",
            "name": "Quote",
            "type": 3,
            "target_id": "11"
        }));
        let ctx = crate::ApplicationContext::new(&discord, &interaction, &());
        assert!(matches!(
            command.invoke(ctx).await,
            Err(InvocationError::CommandStructureMismatch(_))
        ));
    }

    #[tokio::test]
    async fn test_autocomplete_without_handler() {
        let discord = fixtures::discord();
        let interaction = fixtures::autocomplete_interaction(slash_data("config"));
        let ctx = crate::AutocompleteContext::new(&discord, &interaction, &());
        let no_subcommands = HashMap::new();

        let context_menu: CommandDefinition<(), Error> =
            Command::user(CommandMetadata::new("Show avatar", ""), noop_user)
                .with_autocomplete(suggest)
                .into();
        assert!(matches!(context_menu.autocomplete(&no_subcommands, ctx).await, Ok(None)));

        let group: CommandDefinition<(), Error> =
            CommandWithSubcommands::new(CommandMetadata::new("config", "Settings")).into();
        assert!(matches!(group.autocomplete(&no_subcommands, ctx).await, Ok(None)));

        let leaf: CommandDefinition<(), Error> =
            Command::chat_input(CommandMetadata::new("config", "Settings"), Vec::new(), noop)
                .with_autocomplete(suggest)
                .into();
        let choices = leaf.autocomplete(&no_subcommands, ctx).await.unwrap().unwrap();
        assert_eq!(choices[0].name, "a");
    }

    #[tokio::test]
    async fn test_group_routing() {
        let discord = fixtures::discord();
        let group: CommandDefinition<(), Error> =
            CommandWithSubcommands::new(CommandMetadata::new("tags", "Manage tags"))
                .with_autocomplete(suggest_group)
                .into();
        let mut subcommands = HashMap::new();
        subcommands.insert(
            "tags".to_owned(),
            vec![
                crate::Subcommand::<(), Error>::new("add", "Adds a tag", Vec::new(), fail)
                    .with_autocomplete(suggest),
                crate::Subcommand::new("list", "Lists tags", Vec::new(), noop),
            ],
        );

        let invoked = |subcommand: &str| {
            fixtures::command_interaction(serde_json::json!({
                "id": "5",
                "name": "tags",
                "type": 1,
                "options": [{ "name": subcommand, "type": 1, "options": [] }]
            }))
        };
        let add = invoked("add");
        let ctx = crate::ApplicationContext::new(&discord, &add, &());
        assert_eq!(handler_error(group.invoke(&subcommands, ctx).await), "handler failed");
        let list = invoked("list");
        let ctx = crate::ApplicationContext::new(&discord, &list, &());
        assert!(group.invoke(&subcommands, ctx).await.is_ok());
        let unknown = invoked("remove");
        let ctx = crate::ApplicationContext::new(&discord, &unknown, &());
        assert!(matches!(
            group.invoke(&subcommands, ctx).await,
            Err(InvocationError::CommandStructureMismatch(_))
        ));

        let typing_in = |subcommand: &str| {
            fixtures::autocomplete_interaction(serde_json::json!({
                "id": "5",
                "name": "tags",
                "type": 1,
                "options": [{
                    "name": subcommand,
                    "type": 1,
                    "options": [{ "name": "tag", "type": 3, "value": "", "focused": true }]
                }]
            }))
        };
        // The subcommand's own handler wins, the group's handler covers the rest
        let add = typing_in("add");
        let ctx = crate::AutocompleteContext::new(&discord, &add, &());
        let choices = group.autocomplete(&subcommands, ctx).await.unwrap().unwrap();
        assert_eq!(choices[0].name, "a");
        let list = typing_in("list");
        let ctx = crate::AutocompleteContext::new(&discord, &list, &());
        let choices = group.autocomplete(&subcommands, ctx).await.unwrap().unwrap();
        assert_eq!(choices[0].name, "group");
    }
}
