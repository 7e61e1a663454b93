//! Options of chat input commands and their choices

use std::collections::HashMap;

use crate::serenity_prelude as serenity;

/// Value types a command option may take.
///
/// Subcommand and subcommand group options are not listed here; those are produced from
/// [`crate::Subcommand`] values.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OptionType {
    /// Free text
    String,
    /// Whole number
    Integer,
    /// True or false
    Boolean,
    /// A Discord user, resolved to a member inside guilds
    User,
    /// A guild channel
    Channel,
    /// A guild role
    Role,
    /// A user or a role
    Mentionable,
    /// Floating point number
    Number,
    /// An uploaded file
    Attachment,
}

impl OptionType {
    /// The serenity option type this value type registers as
    pub fn as_serenity(self) -> serenity::CommandOptionType {
        match self {
            Self::String => serenity::CommandOptionType::String,
            Self::Integer => serenity::CommandOptionType::Integer,
            Self::Boolean => serenity::CommandOptionType::Boolean,
            Self::User => serenity::CommandOptionType::User,
            Self::Channel => serenity::CommandOptionType::Channel,
            Self::Role => serenity::CommandOptionType::Role,
            Self::Mentionable => serenity::CommandOptionType::Mentionable,
            Self::Number => serenity::CommandOptionType::Number,
            Self::Attachment => serenity::CommandOptionType::Attachment,
        }
    }

    /// Whether Discord allows autocomplete on options of this type
    pub fn supports_autocomplete(self) -> bool {
        matches!(self, Self::String | Self::Integer | Self::Number)
    }
}

/// Value of a fixed choice or an autocomplete suggestion
#[derive(Clone, Debug, PartialEq)]
pub enum ChoiceValue {
    /// For [`OptionType::String`] options
    String(String),
    /// For [`OptionType::Integer`] options
    Integer(i64),
    /// For [`OptionType::Number`] options
    Number(f64),
}

impl ChoiceValue {
    /// JSON form as sent to Discord
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::String(x) => serde_json::Value::from(x.as_str()),
            Self::Integer(x) => serde_json::Value::from(*x),
            Self::Number(x) => serde_json::Value::from(*x),
        }
    }
}

impl From<String> for ChoiceValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}
impl From<&str> for ChoiceValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}
impl From<i64> for ChoiceValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}
impl From<f64> for ChoiceValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// A single drop-down choice of a command option
#[derive(Clone, Debug, PartialEq)]
pub struct OptionChoice {
    /// Label of this choice
    pub name: String,
    /// Localized labels with locale string as the key
    pub name_localizations: HashMap<String, String>,
    /// Value sent to the bot when this choice is picked
    pub value: ChoiceValue,
}

impl OptionChoice {
    /// Creates a choice without localizations
    pub fn new(name: impl Into<String>, value: impl Into<ChoiceValue>) -> Self {
        Self {
            name: name.into(),
            name_localizations: HashMap::new(),
            value: value.into(),
        }
    }

    /// Creates a choice whose label is looked up in the given translator
    pub fn localized<T: crate::Translator>(
        translator: &T,
        name_key: &str,
        value: impl Into<ChoiceValue>,
    ) -> Result<Self, T::Error> {
        let name = crate::localized_prop(translator, "name", name_key)?;
        Ok(Self {
            name: name.value,
            name_localizations: name.localizations,
            value: value.into(),
        })
    }

    /// JSON form as sent to Discord
    pub fn to_json(&self) -> serde_json::Value {
        choice_json(&self.name, &self.name_localizations, &self.value)
    }
}

/// Option choices and autocomplete suggestions share this JSON shape
fn choice_json(
    name: &str,
    name_localizations: &HashMap<String, String>,
    value: &ChoiceValue,
) -> serde_json::Value {
    let mut choice = serde_json::Map::new();
    choice.insert("name".into(), name.into());
    if !name_localizations.is_empty() {
        let localizations = name_localizations
            .iter()
            .map(|(locale, name)| (locale.clone(), serde_json::Value::from(name.as_str())))
            .collect();
        choice.insert(
            "name_localizations".into(),
            serde_json::Value::Object(localizations),
        );
    }
    choice.insert("value".into(), value.to_json());
    serde_json::Value::Object(choice)
}

/// A single suggestion returned from an autocomplete handler
#[derive(Clone, Debug, PartialEq)]
pub struct AutocompleteChoice {
    /// Name of the choice, displayed in the Discord UI
    pub name: String,
    /// Localized names with locale string as the key
    pub name_localizations: HashMap<String, String>,
    /// Value of the choice, sent to the bot
    pub value: ChoiceValue,
}

impl AutocompleteChoice {
    /// Creates a new autocomplete suggestion
    pub fn new(name: impl Into<String>, value: impl Into<ChoiceValue>) -> Self {
        Self {
            name: name.into(),
            name_localizations: HashMap::new(),
            value: value.into(),
        }
    }

    /// Creates a suggestion whose label is looked up in the given translator
    pub fn localized<T: crate::Translator>(
        translator: &T,
        name_key: &str,
        value: impl Into<ChoiceValue>,
    ) -> Result<Self, T::Error> {
        let name = crate::localized_prop(translator, "name", name_key)?;
        Ok(Self {
            name: name.value,
            name_localizations: name.localizations,
            value: value.into(),
        })
    }

    /// JSON form as sent to Discord
    pub fn to_json(&self) -> serde_json::Value {
        choice_json(&self.name, &self.name_localizations, &self.value)
    }
}

impl From<String> for AutocompleteChoice {
    fn from(value: String) -> Self {
        Self::new(value.clone(), ChoiceValue::String(value))
    }
}

/// A single option of a chat input command or subcommand
#[derive(Clone, Debug, PartialEq)]
pub struct CommandOption {
    /// Value type of this option
    pub kind: OptionType,
    /// Name of this option
    pub name: String,
    /// Localized names with locale string as the key
    pub name_localizations: HashMap<String, String>,
    /// Description of the option, displayed under the option name
    pub description: String,
    /// Localized descriptions with locale string as the key
    pub description_localizations: HashMap<String, String>,
    /// `true` if the user has to fill in this option
    pub required: bool,
    /// Whether Discord should send autocomplete interactions while the user types
    pub autocomplete: bool,
    /// If not empty, the user can only pick one of these
    pub choices: Vec<OptionChoice>,
}

impl CommandOption {
    /// Creates an optional, non-autocompleted option without choices
    pub fn new(kind: OptionType, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            name_localizations: HashMap::new(),
            description: description.into(),
            description_localizations: HashMap::new(),
            required: false,
            autocomplete: false,
            choices: Vec::new(),
        }
    }

    /// Creates an option whose name and description are looked up in the given translator
    pub fn localized<T: crate::Translator>(
        translator: &T,
        kind: OptionType,
        name_key: &str,
        description_key: &str,
    ) -> Result<Self, T::Error> {
        let name = crate::localized_prop(translator, "name", name_key)?;
        let description = crate::localized_prop(translator, "description", description_key)?;
        Ok(Self {
            name: name.value,
            name_localizations: name.localizations,
            description: description.value,
            description_localizations: description.localizations,
            ..Self::new(kind, String::new(), String::new())
        })
    }

    /// Marks this option as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Enables autocomplete for this option
    pub fn autocomplete(mut self) -> Self {
        self.autocomplete = true;
        self
    }

    /// Adds a fixed choice
    pub fn choice(mut self, choice: OptionChoice) -> Self {
        self.choices.push(choice);
        self
    }

    /// Generates a command option builder from this [`CommandOption`] instance. This can be used
    /// to register the command on Discord's servers
    pub fn create_as_slash_command_option(&self) -> serenity::CreateApplicationCommandOption {
        if self.autocomplete && !self.kind.supports_autocomplete() {
            log::warn!(
                "option `{}` requests autocomplete but {:?} options don't support it",
                self.name,
                self.kind
            );
        }

        let mut builder = serenity::CreateApplicationCommandOption::default();
        builder
            .kind(self.kind.as_serenity())
            .name(&self.name)
            .description(&self.description)
            .required(self.required)
            .set_autocomplete(self.autocomplete);

        for (locale, name) in &self.name_localizations {
            builder.name_localized(locale, name);
        }
        for (locale, description) in &self.description_localizations {
            builder.description_localized(locale, description);
        }
        if !self.choices.is_empty() {
            let choices = self.choices.iter().map(OptionChoice::to_json).collect();
            builder
                .0
                .insert("choices", serde_json::Value::Array(choices));
        }

        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_builder() {
        let mut name_localizations = HashMap::new();
        name_localizations.insert("fr".to_owned(), "couleur".to_owned());

        let option = CommandOption {
            name_localizations,
            ..CommandOption::new(OptionType::String, "color", "Pick a color")
        }
        .required()
        .choice(OptionChoice::new("Red", "red"))
        .choice(OptionChoice::new("Blue", "blue"));

        let builder = option.create_as_slash_command_option();
        assert_eq!(builder.0["name"], "color");
        assert_eq!(builder.0["description"], "Pick a color");
        assert_eq!(builder.0["required"], true);
        assert_eq!(builder.0["autocomplete"], false);
        assert_eq!(builder.0["type"], 3);
        assert_eq!(builder.0["name_localizations"]["fr"], "couleur");
        assert_eq!(
            builder.0["choices"],
            serde_json::json!([
                { "name": "Red", "value": "red" },
                { "name": "Blue", "value": "blue" },
            ])
        );
    }

    #[test]
    fn test_choice_values() {
        assert_eq!(ChoiceValue::from(5_i64).to_json(), serde_json::json!(5));
        assert_eq!(ChoiceValue::from(0.5).to_json(), serde_json::json!(0.5));
        assert_eq!(
            AutocompleteChoice::from(String::from("apple")),
            AutocompleteChoice::new("apple", "apple")
        );
    }

    #[test]
    fn test_autocomplete_support() {
        assert!(OptionType::String.supports_autocomplete());
        assert!(OptionType::Number.supports_autocomplete());
        assert!(!OptionType::User.supports_autocomplete());
        assert!(!OptionType::Attachment.supports_autocomplete());
    }
}
