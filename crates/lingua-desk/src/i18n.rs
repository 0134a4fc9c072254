use std::collections::BTreeMap;
use std::env;

use once_cell::sync::Lazy;
use unic_langid::LanguageIdentifier;

pub const SUPPORTED_LOCALES: &[&str] = &["en", "uk"];

/// Locale used when neither the caller nor the environment names a
/// supported one.
pub const FALLBACK_LOCALE: &str = "uk";

static EN_MESSAGES: Lazy<BTreeMap<String, String>> =
    Lazy::new(|| parse_catalog("en", include_str!("../i18n/en.json")));
static UK_MESSAGES: Lazy<BTreeMap<String, String>> =
    Lazy::new(|| parse_catalog("uk", include_str!("../i18n/uk.json")));

fn parse_catalog(locale: &str, raw: &str) -> BTreeMap<String, String> {
    serde_json::from_str(raw).unwrap_or_else(|err| {
        tracing::warn!(%locale, error = %err, "embedded message catalog is invalid");
        BTreeMap::new()
    })
}

/// Message catalog for one locale, with English filling any gaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    locale: String,
    messages: BTreeMap<String, String>,
}

impl Catalog {
    /// Catalog for `locale`; unsupported locales resolve to the fallback.
    pub fn for_locale(locale: &str) -> Self {
        let locale =
            resolve_supported_locale(locale).unwrap_or_else(|| FALLBACK_LOCALE.to_string());
        let mut messages = EN_MESSAGES.clone();
        if locale == "uk" {
            messages.extend(UK_MESSAGES.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        Self { locale, messages }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn tr(&self, key: &str) -> String {
        self.messages
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    /// Translates `key` and fills each `{}` with the next argument.
    ///
    /// Arguments are inserted verbatim; a `{}` inside an argument is not a
    /// placeholder. Placeholders left without an argument stay as `{}`.
    pub fn trf(&self, key: &str, args: &[&str]) -> String {
        let template = self.tr(key);
        let mut args = args.iter();
        let mut msg = String::with_capacity(template.len());
        let mut rest = template.as_str();
        while let Some(pos) = rest.find("{}") {
            msg.push_str(&rest[..pos]);
            msg.push_str(args.next().copied().unwrap_or("{}"));
            rest = &rest[pos + 2..];
        }
        msg.push_str(rest);
        msg
    }
}

fn detect_env_locale() -> Option<String> {
    for key in ["LC_ALL", "LC_MESSAGES", "LANG"] {
        if let Ok(val) = env::var(key) {
            let trimmed = val.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}

fn detect_system_locale() -> Option<String> {
    sys_locale::get_locale()
}

/// Normalizes POSIX-style names (`uk_UA.UTF-8`) to BCP 47 (`uk-UA`).
pub fn normalize_locale(raw: &str) -> Option<String> {
    let mut cleaned = raw.trim();
    if cleaned.is_empty() {
        return None;
    }
    if let Some((head, _)) = cleaned.split_once('.') {
        cleaned = head;
    }
    if let Some((head, _)) = cleaned.split_once('@') {
        cleaned = head;
    }
    let cleaned = cleaned.replace('_', "-");
    cleaned
        .parse::<LanguageIdentifier>()
        .ok()
        .map(|lid| lid.to_string())
}

pub fn resolve_supported_locale(candidate: &str) -> Option<String> {
    let norm = normalize_locale(candidate)?;
    if SUPPORTED_LOCALES.iter().any(|supported| *supported == norm) {
        return Some(norm);
    }
    let base = norm.split('-').next()?.to_ascii_lowercase();
    SUPPORTED_LOCALES
        .iter()
        .find(|supported| **supported == base)
        .map(|supported| supported.to_string())
}

/// Picks the first supported locale among the explicit request, the
/// `LC_*`/`LANG` environment and the system locale.
pub fn select_locale(requested: Option<&str>) -> String {
    if let Some(found) = requested.and_then(resolve_supported_locale) {
        return found;
    }
    if let Some(found) = detect_env_locale().and_then(|loc| resolve_supported_locale(&loc)) {
        return found;
    }
    if let Some(found) = detect_system_locale().and_then(|loc| resolve_supported_locale(&loc)) {
        return found;
    }
    FALLBACK_LOCALE.to_string()
}
