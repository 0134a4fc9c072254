//! Trial-lesson booking and placement level check for a language school.
//!
//! The booking and quiz flows are plain state values driven by action
//! enums; [`session::SiteSession`] owns them for one visitor. The `cli`
//! feature adds the `lingua-desk` terminal front end.

pub mod booking;
pub mod config;
pub mod contact;
pub mod i18n;
pub mod quiz;
pub mod session;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod cmd;

pub use booking::{BookingAction, BookingScreen, BookingSelection, BookingState, WizardStep};
pub use config::{ConfigError, DeskConfig};
pub use contact::ContactChannel;
pub use i18n::Catalog;
pub use quiz::{QuizAction, QuizPhase, QuizResult, QuizState};
pub use session::{BookingDialog, BookingLauncher, QuizDialog, SiteSession, TeacherCatalog};
