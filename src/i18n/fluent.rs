use crate::config::Config;
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use rust_embed::RustEmbed;
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

pub struct I18n {
    bundles: HashMap<LanguageIdentifier, FluentBundle<FluentResource>>,
    pub available_locales: Vec<LanguageIdentifier>,
    current_locale: LanguageIdentifier,
}

impl Default for I18n {
    fn default() -> Self {
        Self::new(None, None, &Config::default())
    }
}

impl I18n {
    /// Builds the localization table from the embedded `.ftl` bundles, plus
    /// any `.ftl` files found in `i18n_dir` (which override embedded ones for
    /// the same locale). The active locale is resolved CLI → config → OS,
    /// falling back to `en-US`.
    pub fn new(cli_lang: Option<String>, i18n_dir: Option<String>, config: &Config) -> Self {
        let mut bundles = HashMap::new();
        let mut available_locales = Vec::new();

        for file in Asset::iter() {
            let filename = file.as_ref();
            if let Some(content) = Asset::get(filename) {
                let source = String::from_utf8_lossy(content.data.as_ref()).to_string();
                add_bundle(&mut bundles, &mut available_locales, filename, source);
            }
        }

        // Custom builds can override or extend the embedded translations.
        if let Some(dir) = i18n_dir {
            if let Ok(entries) = std::fs::read_dir(&dir) {
                for entry in entries.flatten() {
                    let filename = entry.file_name().to_string_lossy().to_string();
                    if let Ok(source) = std::fs::read_to_string(entry.path()) {
                        add_bundle(&mut bundles, &mut available_locales, &filename, source);
                    }
                }
            }
        }

        let default_locale: LanguageIdentifier = "en-US".parse().unwrap();
        let current_locale =
            resolve_locale(cli_lang, config, &available_locales).unwrap_or(default_locale);

        Self {
            bundles,
            available_locales,
            current_locale,
        }
    }

    pub fn set_locale(&mut self, locale: LanguageIdentifier) {
        if self.bundles.contains_key(&locale) {
            self.current_locale = locale;
        }
    }

    #[must_use]
    pub fn current_locale(&self) -> &LanguageIdentifier {
        &self.current_locale
    }

    /// Resolves a message key in the current locale.
    pub fn tr(&self, key: &str) -> String {
        self.translate(key, None)
    }

    /// Resolves a message key with interpolation arguments.
    pub fn tr_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut fluent_args = FluentArgs::new();
        for (name, value) in args.iter().copied() {
            fluent_args.set(name, FluentValue::from(value));
        }
        self.translate(key, Some(&fluent_args))
    }

    fn translate(&self, key: &str, args: Option<&FluentArgs>) -> String {
        if let Some(bundle) = self.bundles.get(&self.current_locale) {
            if let Some(msg) = bundle.get_message(key) {
                if let Some(pattern) = msg.value() {
                    let mut errors = vec![];
                    let value = bundle.format_pattern(pattern, args, &mut errors);
                    if errors.is_empty() {
                        return value.to_string();
                    }
                }
            }
        }
        format!("MISSING: {}", key)
    }
}

fn add_bundle(
    bundles: &mut HashMap<LanguageIdentifier, FluentBundle<FluentResource>>,
    available_locales: &mut Vec<LanguageIdentifier>,
    filename: &str,
    source: String,
) {
    let Some(locale_str) = filename.strip_suffix(".ftl") else {
        return;
    };
    let Ok(locale) = locale_str.parse::<LanguageIdentifier>() else {
        return;
    };
    let res = FluentResource::try_new(source).expect("Failed to parse FTL file.");
    let mut bundle = FluentBundle::new(vec![locale.clone()]);
    bundle.add_resource(res).expect("Failed to add resource.");
    if bundles.insert(locale.clone(), bundle).is_none() {
        available_locales.push(locale);
    }
}

fn resolve_locale(
    cli_lang: Option<String>,
    config: &Config,
    available: &[LanguageIdentifier],
) -> Option<LanguageIdentifier> {
    // 1. Check CLI args
    if let Some(lang_str) = cli_lang {
        if let Ok(lang) = lang_str.parse::<LanguageIdentifier>() {
            if available.contains(&lang) {
                return Some(lang);
            }
        }
    }

    // 2. Check config file
    if let Some(lang_str) = &config.general.language {
        if let Ok(lang) = lang_str.parse::<LanguageIdentifier>() {
            if available.contains(&lang) {
                return Some(lang);
            }
        }
    }

    // 3. Check OS locale
    if let Some(os_locale_str) = sys_locale::get_locale() {
        if let Ok(os_lang) = os_locale_str.parse::<LanguageIdentifier>() {
            if available.contains(&os_lang) {
                return Some(os_lang);
            }
        }
    }

    None
}
