//! Lesson booking flow: entry choice, a three-step match wizard and the
//! manager contact screen.
//!
//! All navigation goes through [`BookingState::apply`]; the screen and the
//! selection live in one value so a reset is a single assignment.

use lingua_catalog::{GoalId, LanguageId, TeacherDirectory, TeacherId, TeacherProfile};
use serde::Serialize;

use crate::contact::{ContactChannel, compose_booking_message, greeting};
use crate::i18n::Catalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Language,
    Goal,
    Teacher,
}

impl WizardStep {
    pub const COUNT: u8 = 3;

    /// 1-based position shown to the visitor.
    pub fn number(self) -> u8 {
        match self {
            WizardStep::Language => 1,
            WizardStep::Goal => 2,
            WizardStep::Teacher => 3,
        }
    }

    fn next(self) -> Option<Self> {
        match self {
            WizardStep::Language => Some(WizardStep::Goal),
            WizardStep::Goal => Some(WizardStep::Teacher),
            WizardStep::Teacher => None,
        }
    }

    fn previous(self) -> Option<Self> {
        match self {
            WizardStep::Language => None,
            WizardStep::Goal => Some(WizardStep::Language),
            WizardStep::Teacher => Some(WizardStep::Goal),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "screen", content = "step", rename_all = "snake_case")]
pub enum BookingScreen {
    #[default]
    Entry,
    Wizard(WizardStep),
    Manager,
}

/// What the visitor has picked so far.
///
/// A teacher is only ever set together with a goal, and a goal only with a
/// language: choosing an upstream field clears everything after it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BookingSelection {
    language: Option<LanguageId>,
    goal: Option<GoalId>,
    teacher: Option<TeacherId>,
}

impl BookingSelection {
    pub fn language(&self) -> Option<LanguageId> {
        self.language
    }

    pub fn goal(&self) -> Option<GoalId> {
        self.goal
    }

    pub fn teacher(&self) -> Option<&TeacherId> {
        self.teacher.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.language.is_some() && self.goal.is_some() && self.teacher.is_some()
    }

    fn select_language(&mut self, language: LanguageId) {
        self.language = Some(language);
        self.goal = None;
        self.teacher = None;
    }

    fn select_goal(&mut self, goal: GoalId) {
        if self.language.is_none() {
            return;
        }
        self.goal = Some(goal);
        self.teacher = None;
    }

    fn select_teacher(&mut self, teacher: TeacherId) {
        if self.goal.is_none() {
            return;
        }
        self.teacher = Some(teacher);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingAction {
    SelfServe,
    ContactManager,
    SelectLanguage(LanguageId),
    SelectGoal(GoalId),
    SelectTeacher(TeacherId),
    Next,
    Back,
    Close,
}

/// Title, subtitle and progress for the current screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingHeader {
    pub title: String,
    pub subtitle: String,
    pub progress_percent: u8,
}

/// A teacher as listed on the last wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TeacherCard<'a> {
    pub teacher: &'a TeacherProfile,
    pub selected: bool,
    pub recommended: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BookingState {
    screen: BookingScreen,
    selection: BookingSelection,
}

impl BookingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> BookingScreen {
        self.screen
    }

    pub fn selection(&self) -> &BookingSelection {
        &self.selection
    }

    /// State reached from `self` by `action`, leaving `self` untouched.
    pub fn transition(
        &self,
        action: &BookingAction,
        directory: &TeacherDirectory,
    ) -> BookingState {
        let mut next = self.clone();
        next.apply(action, directory);
        next
    }

    /// Applies `action` in place. Actions that make no sense on the current
    /// screen are ignored, as are languages `directory` does not book and
    /// teachers it does not list.
    pub fn apply(&mut self, action: &BookingAction, directory: &TeacherDirectory) {
        let before = self.screen;
        match (self.screen, action) {
            (_, BookingAction::Close) => *self = Self::default(),
            (BookingScreen::Entry, BookingAction::SelfServe) => {
                self.screen = BookingScreen::Wizard(WizardStep::Language);
            }
            (BookingScreen::Entry, BookingAction::ContactManager) => {
                self.screen = BookingScreen::Manager;
            }
            (
                BookingScreen::Wizard(WizardStep::Language),
                BookingAction::SelectLanguage(language),
            ) => {
                let offered = directory
                    .booking_options()
                    .iter()
                    .any(|option| option.id == *language);
                if !offered {
                    tracing::debug!(%language, "language not offered for booking");
                    return;
                }
                self.selection.select_language(*language)
            }
            (BookingScreen::Wizard(WizardStep::Goal), BookingAction::SelectGoal(goal)) => {
                self.selection.select_goal(*goal)
            }
            (BookingScreen::Wizard(WizardStep::Teacher), BookingAction::SelectTeacher(teacher)) => {
                if directory.teacher(teacher).is_none() {
                    tracing::debug!(%teacher, "unknown teacher ignored");
                    return;
                }
                self.selection.select_teacher(teacher.clone())
            }
            (BookingScreen::Wizard(step), BookingAction::Next) => {
                if let Some(next) = step.next().filter(|_| self.can_go_next()) {
                    self.screen = BookingScreen::Wizard(next);
                }
            }
            (BookingScreen::Wizard(step), BookingAction::Back) => {
                self.screen = step
                    .previous()
                    .map(BookingScreen::Wizard)
                    .unwrap_or(BookingScreen::Entry);
            }
            (BookingScreen::Manager, BookingAction::Back) => self.screen = BookingScreen::Entry,
            (screen, action) => {
                tracing::debug!(?screen, ?action, "booking action ignored");
                return;
            }
        }
        if before != self.screen {
            tracing::debug!(from = ?before, to = ?self.screen, "booking screen changed");
        }
    }

    /// Whether "next" is enabled on the current wizard step.
    pub fn can_go_next(&self) -> bool {
        match self.screen {
            BookingScreen::Wizard(WizardStep::Language) => self.selection.language.is_some(),
            BookingScreen::Wizard(WizardStep::Goal) => self.selection.goal.is_some(),
            _ => false,
        }
    }

    /// Whether the request can be sent from the teacher step.
    pub fn can_finish(&self) -> bool {
        self.screen == BookingScreen::Wizard(WizardStep::Teacher) && self.selection.is_complete()
    }

    pub fn progress_percent(&self) -> u8 {
        match self.screen {
            BookingScreen::Wizard(step) => {
                let ratio = f64::from(step.number()) / f64::from(WizardStep::COUNT);
                (ratio * 100.0).round() as u8
            }
            _ => 0,
        }
    }

    pub fn header(&self, catalog: &Catalog) -> BookingHeader {
        let (title, subtitle) = match self.screen {
            BookingScreen::Entry => (
                catalog.tr("booking.entry.title"),
                catalog.tr("booking.entry.subtitle"),
            ),
            BookingScreen::Wizard(step) => {
                let current = step.number().to_string();
                let total = WizardStep::COUNT.to_string();
                (
                    catalog.tr("booking.wizard.title"),
                    catalog.trf("booking.wizard.subtitle", &[current.as_str(), total.as_str()]),
                )
            }
            BookingScreen::Manager => (
                catalog.tr("booking.manager.title"),
                catalog.tr("booking.manager.subtitle"),
            ),
        };
        BookingHeader {
            title,
            subtitle,
            progress_percent: self.progress_percent(),
        }
    }

    /// Every teacher in the directory, flagged against the current choice.
    pub fn teacher_cards<'a>(&self, directory: &'a TeacherDirectory) -> Vec<TeacherCard<'a>> {
        directory
            .teachers()
            .into_iter()
            .map(|teacher| TeacherCard {
                teacher,
                selected: self.selection.teacher.as_ref() == Some(&teacher.id),
                recommended: teacher
                    .is_recommended_for(self.selection.language, self.selection.goal),
            })
            .collect()
    }

    /// Chat link carrying the booking request, once it can be sent.
    pub fn finish(
        &self,
        directory: &TeacherDirectory,
        catalog: &Catalog,
        contact: &ContactChannel,
    ) -> Option<String> {
        if !self.can_finish() {
            return None;
        }
        let message = compose_booking_message(&self.selection, directory, catalog);
        Some(contact.link_with_text(&message))
    }
}

/// Chat link for the manager screen, pre-filled with the greeting only.
pub fn manager_link(catalog: &Catalog, contact: &ContactChannel) -> String {
    contact.link_with_text(&greeting(catalog))
}
