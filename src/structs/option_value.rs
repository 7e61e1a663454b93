//! Typed values of the options a user filled in

use std::collections::HashMap;

use crate::serenity_prelude as serenity;

/// Value of a single option the user filled in.
///
/// IDs of users, channels, roles and attachments are already resolved to the objects Discord sent
/// along with the interaction.
#[derive(Clone, Debug)]
pub enum OptionValue {
    /// A string
    String(String),
    /// An integer
    Integer(i64),
    /// A floating point number
    Number(f64),
    /// A boolean
    Boolean(bool),
    /// A user, plus their guild member data if the command was used in a guild
    User(serenity::User, Option<serenity::PartialMember>),
    /// A channel
    Channel(serenity::PartialChannel),
    /// A role
    Role(serenity::Role),
    /// An uploaded file
    Attachment(serenity::Attachment),
}

impl OptionValue {
    /// Converts serenity's resolved option value. `None` for kinds this crate doesn't know
    fn from_resolved(value: &serenity::CommandDataOptionValue) -> Option<Self> {
        use crate::serenity_prelude::CommandDataOptionValue as Resolved;

        Some(match value {
            Resolved::String(x) => Self::String(x.clone()),
            Resolved::Integer(x) => Self::Integer(*x),
            Resolved::Number(x) => Self::Number(*x),
            Resolved::Boolean(x) => Self::Boolean(*x),
            Resolved::User(user, member) => Self::User(user.clone(), member.clone()),
            Resolved::Channel(channel) => Self::Channel(channel.clone()),
            Resolved::Role(role) => Self::Role(role.clone()),
            Resolved::Attachment(attachment) => Self::Attachment(attachment.clone()),
            _ => return None,
        })
    }

    /// The string, if this is a string option
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(x) => Some(x),
            _ => None,
        }
    }

    /// The integer, if this is an integer option
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(x) => Some(*x),
            _ => None,
        }
    }

    /// The number, if this is a number or integer option
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(x) => Some(*x),
            Self::Integer(x) => Some(*x as f64),
            _ => None,
        }
    }

    /// The boolean, if this is a boolean option
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(x) => Some(*x),
            _ => None,
        }
    }

    /// The user, if this is a user option
    pub fn as_user(&self) -> Option<&serenity::User> {
        match self {
            Self::User(user, _) => Some(user),
            _ => None,
        }
    }
}

/// Maps option names to their typed values.
///
/// Options without a resolved value (subcommand wrappers, or objects Discord didn't send along)
/// are left out.
pub(crate) fn option_values(
    options: &[serenity::CommandDataOption],
) -> HashMap<&str, OptionValue> {
    options
        .iter()
        .filter_map(|option| {
            let value = option.resolved.as_ref().and_then(OptionValue::from_resolved);
            if value.is_none() {
                log::warn!("option `{}` has no resolved value", option.name);
            }
            Some((option.name.as_str(), value?))
        })
        .collect()
}
