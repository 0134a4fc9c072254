use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseIdError;

/// Languages taught by the school.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageId {
    En,
    Es,
    De,
    Fr,
}

impl LanguageId {
    pub const ALL: [LanguageId; 4] = [
        LanguageId::En,
        LanguageId::Es,
        LanguageId::De,
        LanguageId::Fr,
    ];

    /// Two-letter code used in ids, URLs and data files.
    pub fn code(self) -> &'static str {
        match self {
            LanguageId::En => "en",
            LanguageId::Es => "es",
            LanguageId::De => "de",
            LanguageId::Fr => "fr",
        }
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for LanguageId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        LanguageId::ALL
            .into_iter()
            .find(|id| id.code() == code)
            .ok_or_else(|| ParseIdError {
                kind: "language",
                value: s.to_string(),
            })
    }
}

/// Learning goals offered in the booking flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalId {
    Work,
    Move,
    Exam,
    Life,
}

impl GoalId {
    pub const ALL: [GoalId; 4] = [GoalId::Work, GoalId::Move, GoalId::Exam, GoalId::Life];

    pub fn code(self) -> &'static str {
        match self {
            GoalId::Work => "work",
            GoalId::Move => "move",
            GoalId::Exam => "exam",
            GoalId::Life => "life",
        }
    }
}

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for GoalId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        GoalId::ALL
            .into_iter()
            .find(|id| id.code() == code)
            .ok_or_else(|| ParseIdError {
                kind: "goal",
                value: s.to_string(),
            })
    }
}

/// Selectable language card: code, display title and a badge glyph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageOption {
    pub id: LanguageId,
    pub title: String,
    #[serde(default)]
    pub desc: String,
    pub badge: String,
}

/// Selectable goal card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalOption {
    pub id: GoalId,
    pub title: String,
    #[serde(default)]
    pub desc: String,
}

/// Option lists whose entries carry an id and a display title.
pub trait Labeled {
    type Id: PartialEq + Copy;

    fn id(&self) -> Self::Id;
    fn title(&self) -> &str;
}

impl Labeled for LanguageOption {
    type Id = LanguageId;

    fn id(&self) -> LanguageId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }
}

impl Labeled for GoalOption {
    type Id = GoalId;

    fn id(&self) -> GoalId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }
}

/// Display title for `id`, or `None` when unset or not listed.
pub fn label_for<T: Labeled>(options: &[T], id: Option<T::Id>) -> Option<&str> {
    let id = id?;
    options
        .iter()
        .find(|option| option.id() == id)
        .map(Labeled::title)
}
