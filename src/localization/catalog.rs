//! In-memory translation tables

use std::collections::HashMap;

/// Translator backed by plain `locale -> key -> string` tables.
///
/// Lookups that miss in the requested locale fall back to the default locale, then to the key
/// itself, so this translator never fails.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    /// Locale used when no locale is requested
    default_locale: String,
    /// Strings per locale, then per key
    tables: HashMap<String, HashMap<String, String>>,
}

impl Catalog {
    /// Creates an empty catalog. The default locale counts as known even without strings
    pub fn new(default_locale: impl Into<String>) -> Self {
        let default_locale = default_locale.into();
        let mut tables = HashMap::new();
        tables.insert(default_locale.clone(), HashMap::new());
        Self {
            default_locale,
            tables,
        }
    }

    /// Stores the string for `key` in `locale`, adding the locale if it's new
    pub fn insert(
        &mut self,
        locale: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.tables
            .entry(locale.into())
            .or_default()
            .insert(key.into(), value.into());
        self
    }

    /// Looks up `key` in exactly this locale, without any fallback
    pub fn get(&self, locale: &str, key: &str) -> Option<&str> {
        self.tables.get(locale)?.get(key).map(String::as_str)
    }
}

impl crate::Translator for Catalog {
    type Error = std::convert::Infallible;

    fn default_locale(&self) -> &str {
        &self.default_locale
    }

    fn locales(&self) -> Vec<&str> {
        let mut locales = self.tables.keys().map(String::as_str).collect::<Vec<_>>();
        locales.sort_unstable();
        locales
    }

    fn translate(&self, key: &str, locale: Option<&str>) -> Result<String, Self::Error> {
        let locale = locale.unwrap_or(&self.default_locale);
        let translation = self
            .get(locale, key)
            .or_else(|| self.get(&self.default_locale, key))
            .unwrap_or_else(|| {
                log::warn!("unknown translation key `{}`", key);
                key
            });
        Ok(translation.to_owned())
    }
}
