use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::language::{GoalId, GoalOption, LanguageId, LanguageOption};

const EMBEDDED_DIRECTORY: &str = include_str!("../assets/teachers.json");

/// Stable identifier of a teacher within the directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeacherId(String);

impl TeacherId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeacherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TeacherId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Public profile card of a teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherProfile {
    pub id: TeacherId,
    pub name: String,
    pub headline: String,
    #[serde(rename = "desc")]
    pub description: String,
    pub image_url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub languages: BTreeSet<LanguageId>,
    pub goals: BTreeSet<GoalId>,
}

impl TeacherProfile {
    /// Upper-cased first letters of the first two name parts, used when the
    /// avatar image is unavailable.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .take(2)
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// A teacher is recommended only when the selection names both a language
    /// and a goal and the teacher covers both.
    pub fn is_recommended_for(&self, language: Option<LanguageId>, goal: Option<GoalId>) -> bool {
        match (language, goal) {
            (Some(language), Some(goal)) => {
                self.languages.contains(&language) && self.goals.contains(&goal)
            }
            _ => false,
        }
    }
}

/// Languages, goals and teacher rosters shown on the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherDirectory {
    pub languages: Vec<LanguageOption>,
    pub goals: Vec<GoalOption>,
    /// Languages offered in the booking flow, in display order. Defaults to
    /// every listed language.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub booking_languages: Vec<LanguageId>,
    pub teachers_by_language: BTreeMap<LanguageId, Vec<TeacherProfile>>,
}

impl TeacherDirectory {
    /// Directory bundled with the crate.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json_str(EMBEDDED_DIRECTORY)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let directory = Self::from_json_str(&raw)?;
        tracing::info!(path = %path.display(), "loaded teacher directory");
        Ok(directory)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let directory: TeacherDirectory = serde_json::from_str(raw)?;
        directory.validate()?;
        Ok(directory)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.languages.is_empty() {
            return Err(CatalogError::NoLanguages);
        }
        if let Some(unlisted) = self
            .booking_languages
            .iter()
            .find(|id| self.language(**id).is_none())
        {
            return Err(CatalogError::UnlistedBookingLanguage(*unlisted));
        }
        let mut seen = BTreeSet::new();
        for teacher in self.teachers_by_language.values().flatten() {
            if !seen.insert(teacher.id.as_str()) {
                return Err(CatalogError::DuplicateTeacher(teacher.id.to_string()));
            }
        }
        Ok(())
    }

    pub fn language(&self, id: LanguageId) -> Option<&LanguageOption> {
        self.languages.iter().find(|option| option.id == id)
    }

    pub fn goal(&self, id: GoalId) -> Option<&GoalOption> {
        self.goals.iter().find(|option| option.id == id)
    }

    /// Language cards offered by the booking flow.
    pub fn booking_options(&self) -> Vec<&LanguageOption> {
        if self.booking_languages.is_empty() {
            return self.languages.iter().collect();
        }
        self.booking_languages
            .iter()
            .filter_map(|id| self.language(*id))
            .collect()
    }

    /// Roster for one language; empty when nobody teaches it yet.
    pub fn teachers_for(&self, language: LanguageId) -> &[TeacherProfile] {
        self.teachers_by_language
            .get(&language)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every teacher, grouped by the order of the language list. Rosters for
    /// languages missing from that list follow at the end.
    pub fn teachers(&self) -> Vec<&TeacherProfile> {
        let listed = self.languages.iter().map(|option| option.id);
        let unlisted = self
            .teachers_by_language
            .keys()
            .copied()
            .filter(|id| self.language(*id).is_none());
        listed
            .chain(unlisted)
            .flat_map(|id| self.teachers_for(id))
            .collect()
    }

    pub fn teacher(&self, id: &TeacherId) -> Option<&TeacherProfile> {
        self.teachers_by_language
            .values()
            .flatten()
            .find(|teacher| &teacher.id == id)
    }
}
