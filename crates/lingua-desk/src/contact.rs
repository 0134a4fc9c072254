//! Chat deep links carrying a pre-filled message.

use lingua_catalog::{TeacherDirectory, label_for};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};

use crate::booking::BookingSelection;
use crate::i18n::Catalog;

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is escaped.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Base URLs that mean "no chat configured yet".
pub const PLACEHOLDER_BASE_URLS: &[&str] = &["https://t.me/", "https://t.me"];
pub const SHARE_URL_BASE: &str = "https://t.me/share/url";
pub const DEFAULT_CONTACT_URL: &str = "https://t.me/";

/// Shown in a booking message for a field the visitor left unset.
pub const UNSET_LABEL: &str = "—";

pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}

/// The configured chat endpoint messages are sent through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactChannel {
    base_url: String,
}

impl Default for ContactChannel {
    fn default() -> Self {
        Self::new(DEFAULT_CONTACT_URL)
    }
}

impl ContactChannel {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_placeholder(&self) -> bool {
        PLACEHOLDER_BASE_URLS.contains(&self.base_url.trim())
    }

    /// Link that opens the chat with `text` pre-filled.
    ///
    /// A placeholder base falls back to the generic share URL so the link
    /// still works before a real chat is configured.
    pub fn link_with_text(&self, text: &str) -> String {
        let encoded = encode_component(text);
        if self.is_placeholder() {
            tracing::debug!("contact url is a placeholder, using share link");
            return format!("{SHARE_URL_BASE}?text={encoded}");
        }
        let separator = if self.base_url.contains('?') { '&' } else { '?' };
        format!("{}{separator}text={encoded}", self.base_url)
    }
}

/// Opening line of every booking request.
pub fn greeting(catalog: &Catalog) -> String {
    catalog.tr("booking.message.greeting")
}

/// The seven-line booking request sent to the school.
pub fn compose_booking_message(
    selection: &BookingSelection,
    directory: &TeacherDirectory,
    catalog: &Catalog,
) -> String {
    let language = label_for(&directory.languages, selection.language()).unwrap_or(UNSET_LABEL);
    let goal = label_for(&directory.goals, selection.goal()).unwrap_or(UNSET_LABEL);
    let teacher = selection
        .teacher()
        .and_then(|id| directory.teacher(id))
        .map(|teacher| teacher.name.as_str())
        .unwrap_or(UNSET_LABEL);

    [
        greeting(catalog),
        String::new(),
        catalog.trf("booking.message.language", &[language]),
        catalog.trf("booking.message.goal", &[goal]),
        catalog.trf("booking.message.teacher", &[teacher]),
        String::new(),
        catalog.tr("booking.message.closing"),
    ]
    .join("\n")
}
