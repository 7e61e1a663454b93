//! Localized name/description pairs for command metadata, and the translators producing them

use std::collections::HashMap;

mod catalog;
pub use catalog::*;

mod fluent_translator;
pub use fluent_translator::*;

mod locale;
pub use locale::*;

mod translation_error;
pub use translation_error::*;

/// A translation engine that resolves keys to strings in a fixed set of locales.
pub trait Translator {
    /// Error returned when a key can't be resolved. Passed through unmodified by
    /// [`localized_prop`]
    type Error;

    /// The locale used when no locale is given to [`Self::translate`]
    fn default_locale(&self) -> &str;

    /// Every locale this translator knows about
    fn locales(&self) -> Vec<&str>;

    /// Resolves `key` in `locale`, or in [`Self::default_locale`] if `locale` is `None`.
    ///
    /// What happens for keys missing from the catalog is up to the implementation.
    fn translate(&self, key: &str, locale: Option<&str>) -> Result<String, Self::Error>;
}

impl<T: Translator + ?Sized> Translator for &T {
    type Error = T::Error;

    fn default_locale(&self) -> &str {
        (**self).default_locale()
    }

    fn locales(&self) -> Vec<&str> {
        (**self).locales()
    }

    fn translate(&self, key: &str, locale: Option<&str>) -> Result<String, Self::Error> {
        (**self).translate(key, locale)
    }
}

/// A string in the default locale, together with its translations in every known locale.
///
/// Discord expects these as two sibling fields, e.g. `name` and `name_localizations`. This type
/// remembers the property name so it can produce both field names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalizedProp {
    /// Property name, e.g. `name` or `description`
    pub prop: String,
    /// Translation in the default locale
    pub value: String,
    /// Translations with locale string as the key
    pub localizations: HashMap<String, String>,
}

impl LocalizedProp {
    /// Name of the field holding [`Self::value`]
    pub fn field_name(&self) -> &str {
        &self.prop
    }

    /// Name of the field holding [`Self::localizations`], i.e. the property name suffixed with
    /// `_localizations`
    pub fn localizations_field_name(&self) -> String {
        format!("{}_localizations", self.prop)
    }

    /// Inserts both fields into the given JSON object, overwriting previous values
    pub fn merge_into(&self, object: &mut serde_json::Map<String, serde_json::Value>) {
        let localizations = self
            .localizations
            .iter()
            .map(|(locale, value)| (locale.clone(), serde_json::Value::from(value.as_str())))
            .collect();

        object.insert(self.prop.clone(), self.value.as_str().into());
        object.insert(
            self.localizations_field_name(),
            serde_json::Value::Object(localizations),
        );
    }

    /// JSON object with exactly the two fields
    pub fn to_json(&self) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        self.merge_into(&mut object);
        serde_json::Value::Object(object)
    }
}

/// Looks up `key` in the default locale and in every locale of the translator.
///
/// The key isn't checked against the catalog; missing keys are handled by the translator's own
/// fallback policy, and translator errors are returned as-is.
///
/// ```rust
/// # use interaction_commands::{localized_prop, Catalog};
/// let mut catalog = Catalog::new("en-US");
/// catalog.insert("en-US", "cmd.ping.name", "ping");
/// catalog.insert("fr", "cmd.ping.name", "ping");
///
/// let name = localized_prop(&catalog, "name", "cmd.ping.name").unwrap();
/// assert_eq!(
///     name.to_json(),
///     serde_json::json!({ "name": "ping", "name_localizations": { "en-US": "ping", "fr": "ping" } }),
/// );
/// ```
pub fn localized_prop<T: Translator + ?Sized>(
    translator: &T,
    prop: impl Into<String>,
    key: &str,
) -> Result<LocalizedProp, T::Error> {
    let value = translator.translate(key, None)?;

    let mut localizations = HashMap::new();
    for locale in translator.locales() {
        let translation = translator.translate(key, Some(locale))?;
        localizations.insert(locale.to_owned(), translation);
    }

    Ok(LocalizedProp {
        prop: prop.into(),
        value,
        localizations,
    })
}
