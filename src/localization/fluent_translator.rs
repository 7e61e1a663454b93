//! Translator reading Fluent `.ftl` files, one per locale

use std::collections::HashMap;
use std::path::PathBuf;

/// Fluent bundle which can be shared across threads
type FluentBundle =
    fluent::bundle::FluentBundle<fluent::FluentResource, intl_memoizer::concurrent::IntlLangMemoizer>;

/// Which locales a [`FluentTranslator`] reports as known
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LocaleSet {
    /// Only the locales a `.ftl` file was loaded for
    Loaded,
    /// Every locale in [`crate::DISCORD_LOCALES`]. Locales without a file are translated with the
    /// default locale's file
    Discord,
}

/// Configuration of a [`FluentTranslator`]
#[derive(Clone, Debug)]
pub struct TranslatorOptions {
    /// Directory with one `<locale>.ftl` file per locale
    ///
    /// Default: `translations`
    pub directory: PathBuf,
    /// Locale used when no locale is requested. A file for it must exist
    ///
    /// Default: `en-US`
    pub default_locale: String,
    /// Default: [`LocaleSet::Loaded`]
    pub locale_set: LocaleSet,
    /// If true, a key missing from a locale's file is an error instead of falling back to the
    /// default locale and then to the key itself
    ///
    /// Default: false
    pub strict: bool,
    // #[non_exhaustive] forbids struct update syntax for ?? reason
    #[doc(hidden)]
    pub __non_exhaustive: (),
}

impl Default for TranslatorOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("translations"),
            default_locale: String::from("en-US"),
            locale_set: LocaleSet::Loaded,
            strict: false,
            __non_exhaustive: (),
        }
    }
}

/// Translator backed by [Fluent](https://projectfluent.org/) files.
///
/// Keys are either a message id (`ping`) or a message id and attribute separated by a dot
/// (`ping.description`):
///
/// ```ftl
/// ping = ping
///     .description = Checks the latency
/// ```
///
/// Fluent message ids can't contain dots, so only the last dot separates id and attribute. Keys
/// with more than one dot (`cmd.ping.name`) never match a Fluent message; use [`crate::Catalog`]
/// for such keys.
#[derive(derivative::Derivative)]
#[derivative(Debug)]
pub struct FluentTranslator {
    /// Locale used when no locale is requested
    default_locale: String,
    /// One bundle per loaded locale
    #[derivative(Debug = "ignore")]
    bundles: HashMap<String, FluentBundle>,
    /// See [`TranslatorOptions::locale_set`]
    locale_set: LocaleSet,
    /// See [`TranslatorOptions::strict`]
    strict: bool,
}

impl FluentTranslator {
    /// Reads every `.ftl` file in [`TranslatorOptions::directory`]. The file stem is the locale
    pub fn load(options: TranslatorOptions) -> Result<Self, crate::TranslationError> {
        let mut sources = Vec::new();
        for file in std::fs::read_dir(&options.directory)? {
            let path = file?.path();
            if path.extension().map_or(true, |extension| extension != "ftl") {
                log::warn!("skipping non-.ftl file {:?} in translation directory", path);
                continue;
            }

            // Extract locale from filename
            let locale = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .ok_or_else(|| {
                    crate::TranslationError::InvalidFilename(
                        path.file_name().unwrap_or_default().to_owned(),
                    )
                })?
                .to_owned();
            sources.push((locale, std::fs::read_to_string(&path)?));
        }
        Self::from_sources(options, sources)
    }

    /// Builds the translator from `(locale, ftl source)` pairs instead of files.
    /// [`TranslatorOptions::directory`] is ignored.
    pub fn from_sources(
        options: TranslatorOptions,
        sources: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self, crate::TranslationError> {
        let mut bundles = HashMap::new();
        for (locale, source) in sources {
            if !crate::is_discord_locale(&locale) {
                log::warn!(
                    "`{}` is not a Discord locale, Discord will reject its localizations",
                    locale
                );
            }

            // Load .ftl resource
            let resource = fluent::FluentResource::try_new(source).map_err(|(_, errors)| {
                crate::TranslationError::Parse {
                    locale: locale.clone(),
                    errors: errors.iter().map(|e| format!("{:?}", e)).collect(),
                }
            })?;

            // Associate .ftl resource with locale and store it
            let mut bundle = FluentBundle::new_concurrent(vec![locale.parse().map_err(|e| {
                crate::TranslationError::InvalidLocale {
                    locale: locale.clone(),
                    reason: format!("{}", e),
                }
            })?]);
            bundle.set_use_isolating(false);
            bundle
                .add_resource(resource)
                .map_err(|errors| crate::TranslationError::Parse {
                    locale: locale.clone(),
                    errors: errors.iter().map(|e| format!("{:?}", e)).collect(),
                })?;
            bundles.insert(locale, bundle);
        }

        if !bundles.contains_key(&options.default_locale) {
            return Err(crate::TranslationError::MissingDefaultLocale(
                options.default_locale,
            ));
        }

        Ok(Self {
            default_locale: options.default_locale,
            bundles,
            locale_set: options.locale_set,
            strict: options.strict,
        })
    }

    /// The bundle translating `locale`, if any
    fn bundle(&self, locale: &str) -> Option<&FluentBundle> {
        match self.bundles.get(locale) {
            Some(bundle) => Some(bundle),
            None if self.locale_set == LocaleSet::Discord && crate::is_discord_locale(locale) => {
                self.bundles.get(&self.default_locale)
            }
            None => None,
        }
    }
}

/// Formats a Fluent pattern without arguments
fn format(bundle: &FluentBundle, pattern: &fluent_syntax::ast::Pattern<&str>) -> String {
    let mut errors = Vec::new();
    let value = bundle.format_pattern(pattern, None, &mut errors).into_owned();
    if !errors.is_empty() {
        log::warn!("errors while formatting fluent pattern: {:?}", errors);
    }
    value
}

/// Resolves a `message` or `message.attribute` key in the bundle
fn lookup(bundle: &FluentBundle, key: &str) -> Option<String> {
    let (id, attribute) = match key.rsplit_once('.') {
        Some((id, attribute)) => (id, Some(attribute)),
        None => (key, None),
    };

    let message = bundle.get_message(id)?;
    let pattern = match attribute {
        Some(attribute) => message.get_attribute(attribute)?.value(),
        None => message.value()?,
    };
    Some(format(bundle, pattern))
}

impl crate::Translator for FluentTranslator {
    type Error = crate::TranslationError;

    fn default_locale(&self) -> &str {
        &self.default_locale
    }

    fn locales(&self) -> Vec<&str> {
        match self.locale_set {
            LocaleSet::Loaded => {
                let mut locales = self.bundles.keys().map(String::as_str).collect::<Vec<_>>();
                locales.sort_unstable();
                locales
            }
            LocaleSet::Discord => crate::DISCORD_LOCALES.to_vec(),
        }
    }

    fn translate(&self, key: &str, locale: Option<&str>) -> Result<String, Self::Error> {
        let locale = locale.unwrap_or(&self.default_locale);
        if let Some(translation) = self.bundle(locale).and_then(|bundle| lookup(bundle, key)) {
            return Ok(translation);
        }

        if self.strict {
            return Err(crate::TranslationError::MissingKey {
                key: key.to_owned(),
                locale: locale.to_owned(),
            });
        }

        let fallback = self
            .bundles
            .get(&self.default_locale)
            .and_then(|bundle| lookup(bundle, key));
        Ok(fallback.unwrap_or_else(|| {
            log::warn!("unknown fluent key `{}`", key);
            key.to_owned()
        }))
    }
}
