//! Locales supported by Discord

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Every locale Discord accepts as a key in `*_localizations` maps
pub const DISCORD_LOCALES: &[&str] = &[
    "id", "da", "de", "en-GB", "en-US", "es-ES", "es-419", "fr", "hr", "it", "lt", "hu", "nl", "no",
    "pl", "pt-BR", "ro", "fi", "sv-SE", "vi", "tr", "cs", "el", "bg", "ru", "uk", "hi", "th",
    "zh-CN", "ja", "zh-TW", "ko",
];

/// [`DISCORD_LOCALES`] for fast lookup
static DISCORD_LOCALE_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| DISCORD_LOCALES.iter().copied().collect());

/// Whether Discord accepts this locale string. Case sensitive, like Discord itself
pub fn is_discord_locale(locale: &str) -> bool {
    DISCORD_LOCALE_SET.contains(locale)
}

#[cfg(test)]
#[test]
fn test_discord_locales() {
    assert!(is_discord_locale("en-US"));
    assert!(is_discord_locale("es-419"));
    assert!(!is_discord_locale("en"));
    assert!(!is_discord_locale("en-us"));
    assert_eq!(DISCORD_LOCALE_SET.len(), DISCORD_LOCALES.len());
}
