//! Read-only reference data consumed by the booking and level-check flows.
//!
//! Two datasets live here: the teacher directory (languages, goals and the
//! per-language teacher rosters) and the placement test bank (questions,
//! answer keys and level thresholds). Both ship embedded in the crate and can
//! be replaced by files on disk.

pub mod error;
pub mod language;
pub mod placement;
pub mod teachers;

pub use error::{CatalogError, ParseIdError};
pub use language::{GoalId, GoalOption, LanguageId, LanguageOption, Labeled, label_for};
pub use placement::{
    DEFAULT_THRESHOLDS, LevelThreshold, PlacementBank, PlacementTest, TestLanguage, TestOption,
    TestQuestion, level_for,
};
pub use teachers::{TeacherDirectory, TeacherId, TeacherProfile};
