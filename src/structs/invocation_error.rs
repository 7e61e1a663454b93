//! Simple module for the `InvocationError` enum and its impls

/// Error returned when calling a command handler for an interaction.
///
/// Errors thrown by your own handler code are passed through untouched in [`Self::Handler`].
#[derive(Debug)]
pub enum InvocationError<E> {
    /// User code threw an error in the command or autocomplete handler
    Handler(E),
    /// The interaction doesn't fit the command it was passed to, e.g. a user context menu
    /// interaction handed to a slash command, or a context menu interaction without a resolved
    /// target.
    ///
    /// Most often the result of the bot not having re-registered its commands, so Discord still
    /// stores an outdated version of them.
    CommandStructureMismatch(&'static str),
}

impl<E> InvocationError<E> {
    /// Returns the user error, if this error came from the handler
    pub fn handler_error(self) -> Option<E> {
        match self {
            Self::Handler(error) => Some(error),
            Self::CommandStructureMismatch(_) => None,
        }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for InvocationError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Handler(error) => write!(f, "command handler failed: {}", error),
            Self::CommandStructureMismatch(detail) => {
                write!(
                    f,
                    "Bot author did not register their commands correctly ({})",
                    detail
                )
            }
        }
    }
}

impl<E> std::error::Error for InvocationError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Handler(error) => Some(error),
            Self::CommandStructureMismatch(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let error = InvocationError::<String>::CommandStructureMismatch("no target");
        assert_eq!(
            error.to_string(),
            "Bot author did not register their commands correctly (no target)"
        );

        let error = InvocationError::Handler(String::from("boom"));
        assert_eq!(error.to_string(), "command handler failed: boom");
        assert_eq!(error.handler_error().as_deref(), Some("boom"));
    }
}
