use std::path::PathBuf;

use thiserror::Error;

use crate::language::LanguageId;

/// Errors raised while loading or validating catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("teacher directory lists no languages")]
    NoLanguages,
    #[error("duplicate teacher id '{0}'")]
    DuplicateTeacher(String),
    #[error("booking language '{0}' is not listed in the directory languages")]
    UnlistedBookingLanguage(LanguageId),
    #[error("placement bank has no test for '{0}'")]
    MissingTest(LanguageId),
    #[error("question key '{key}' in the '{language}' test is not a number")]
    InvalidQuestionKey { language: LanguageId, key: String },
    #[error("question '{question_id}' expects answer '{answer}' which is not one of its options")]
    UnknownAnswer { question_id: String, answer: String },
}

/// Returned when a language or goal code does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseIdError {
    pub kind: &'static str,
    pub value: String,
}
