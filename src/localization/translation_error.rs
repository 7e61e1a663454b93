//! Simple module for the `TranslationError` enum and its impls

/// Error that can occur while loading `.ftl` files or, in strict mode, while translating
#[derive(Debug)]
pub enum TranslationError {
    /// Reading the translation directory or one of its files failed
    Io(std::io::Error),
    /// A file name in the translation directory isn't of the form `<locale>.ftl`
    InvalidFilename(std::ffi::OsString),
    /// A file name doesn't parse as a language identifier
    InvalidLocale {
        /// The offending locale string
        locale: String,
        /// Why it couldn't be parsed
        reason: String,
    },
    /// A `.ftl` file contains syntax errors
    Parse {
        /// Locale of the file
        locale: String,
        /// Parser messages, one per error
        errors: Vec<String>,
    },
    /// No file was found for the configured default locale
    MissingDefaultLocale(String),
    /// A key is missing from the requested locale and strict mode is on
    MissingKey {
        /// The key which was looked up
        key: String,
        /// The locale it was looked up in
        locale: String,
    },
}

impl std::fmt::Display for TranslationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read translation files: {}", e),
            Self::InvalidFilename(name) => write!(f, "invalid language filename `{:?}`", name),
            Self::InvalidLocale { locale, reason } => {
                write!(f, "invalid locale `{}`: {}", locale, reason)
            }
            Self::Parse { locale, errors } => {
                write!(f, "failed to parse {}.ftl: {}", locale, errors.join("; "))
            }
            Self::MissingDefaultLocale(locale) => {
                write!(f, "no translation file for default locale `{}`", locale)
            }
            Self::MissingKey { key, locale } => {
                write!(f, "translation key `{}` missing in locale `{}`", key, locale)
            }
        }
    }
}

impl std::error::Error for TranslationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TranslationError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
