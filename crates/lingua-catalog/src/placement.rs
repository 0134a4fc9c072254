use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::language::LanguageId;

const EMBEDDED_BANK: &str = include_str!("../assets/placement_tests.json");

/// Tier table shared by every language.
pub const DEFAULT_THRESHOLDS: &[(&str, usize)] = &[
    ("A1", 0),
    ("A2", 6),
    ("B1", 11),
    ("B2", 16),
    ("C1", 20),
];

/// Language card on the level-check start screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestLanguage {
    pub id: LanguageId,
    pub title: String,
    pub badge: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestOption {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestQuestion {
    /// `<language code>-<question number>`, e.g. `en-7`.
    pub id: String,
    pub prompt: String,
    pub options: Vec<TestOption>,
    pub correct_option_id: String,
}

impl TestQuestion {
    pub fn option(&self, id: &str) -> Option<&TestOption> {
        self.options.iter().find(|option| option.id == id)
    }

    pub fn is_correct(&self, option_id: &str) -> bool {
        self.correct_option_id == option_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelThreshold {
    pub level: String,
    pub min_correct: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementTest {
    pub title: String,
    pub thresholds: Vec<LevelThreshold>,
    pub questions: Vec<TestQuestion>,
}

impl PlacementTest {
    pub fn question(&self, index: usize) -> Option<&TestQuestion> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Picks the highest tier whose minimum is met. Thresholds are ranked by
/// descending minimum; equal minimums keep their listed order. When nothing
/// qualifies the tier with the smallest minimum is returned.
pub fn level_for(thresholds: &[LevelThreshold], correct: usize) -> Option<&str> {
    let mut ordered: Vec<&LevelThreshold> = thresholds.iter().collect();
    ordered.sort_by(|a, b| b.min_correct.cmp(&a.min_correct));
    ordered
        .iter()
        .copied()
        .find(|threshold| correct >= threshold.min_correct)
        .or_else(|| ordered.last().copied())
        .map(|threshold| threshold.level.as_str())
}

#[derive(Debug, Deserialize)]
struct RawLanguageTest {
    test_name: String,
    questions: BTreeMap<String, RawQuestion>,
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    prompt: String,
    options: BTreeMap<String, String>,
    answer: String,
}

/// Placement tests for every taught language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacementBank {
    languages: Vec<TestLanguage>,
    tests: BTreeMap<LanguageId, PlacementTest>,
}

impl PlacementBank {
    /// Bank bundled with the crate.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_raw_json(EMBEDDED_BANK)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let bank = Self::from_raw_json(&raw)?;
        tracing::info!(path = %path.display(), "loaded placement bank");
        Ok(bank)
    }

    /// Parses the raw bank (tests keyed by English language name, questions
    /// keyed by their number) into ordered tests with `<code>-<n>` ids.
    pub fn from_raw_json(raw: &str) -> Result<Self, CatalogError> {
        let mut raw_tests: BTreeMap<String, RawLanguageTest> = serde_json::from_str(raw)?;
        let mut languages = Vec::with_capacity(LanguageId::ALL.len());
        let mut tests = BTreeMap::new();
        for language in LanguageId::ALL {
            let (bank_key, title, badge) = language_meta(language);
            let raw_test = raw_tests
                .remove(bank_key)
                .ok_or(CatalogError::MissingTest(language))?;
            let test = PlacementTest {
                title: raw_test.test_name,
                thresholds: default_thresholds(),
                questions: map_questions(language, raw_test.questions)?,
            };
            languages.push(TestLanguage {
                id: language,
                title: title.to_string(),
                badge: badge.to_string(),
            });
            tests.insert(language, test);
        }
        Ok(Self { languages, tests })
    }

    pub fn languages(&self) -> &[TestLanguage] {
        &self.languages
    }

    pub fn test(&self, language: LanguageId) -> Option<&PlacementTest> {
        self.tests.get(&language)
    }
}

fn language_meta(language: LanguageId) -> (&'static str, &'static str, &'static str) {
    match language {
        LanguageId::En => ("english", "English", "🇬🇧"),
        LanguageId::Es => ("spanish", "Spanish", "🇪🇸"),
        LanguageId::De => ("german", "German", "🇩🇪"),
        LanguageId::Fr => ("french", "French", "🇫🇷"),
    }
}

fn default_thresholds() -> Vec<LevelThreshold> {
    DEFAULT_THRESHOLDS
        .iter()
        .map(|(level, min_correct)| LevelThreshold {
            level: (*level).to_string(),
            min_correct: *min_correct,
        })
        .collect()
}

fn map_questions(
    language: LanguageId,
    raw: BTreeMap<String, RawQuestion>,
) -> Result<Vec<TestQuestion>, CatalogError> {
    let mut numbered = raw
        .into_iter()
        .map(|(key, question)| {
            key.trim()
                .parse::<u32>()
                .map(|number| (number, question))
                .map_err(|_| CatalogError::InvalidQuestionKey {
                    language,
                    key: key.clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    // Keys are strings in the source data; "10" must follow "9".
    numbered.sort_by_key(|(number, _)| *number);

    numbered
        .into_iter()
        .map(|(number, question)| {
            let id = format!("{}-{number}", language.code());
            if !question.options.contains_key(&question.answer) {
                return Err(CatalogError::UnknownAnswer {
                    question_id: id,
                    answer: question.answer,
                });
            }
            Ok(TestQuestion {
                id,
                prompt: question.prompt,
                options: question
                    .options
                    .into_iter()
                    .map(|(id, text)| TestOption { id, text })
                    .collect(),
                correct_option_id: question.answer,
            })
        })
        .collect()
}
