//! Dialog ownership for one visitor session.
//!
//! [`SiteSession`] is the only owner of the booking dialog, the level-check
//! dialog and the teacher catalog. Anything that wants to open booking gets
//! a `&mut dyn BookingLauncher` from it; there is no shared global.

use lingua_catalog::{LanguageId, LanguageOption, PlacementBank, TeacherDirectory, TeacherProfile};

use crate::booking::{BookingAction, BookingScreen, BookingState, manager_link};
use crate::contact::ContactChannel;
use crate::i18n::Catalog;
use crate::quiz::{QuizAction, QuizState};

/// Capability to bring up the booking dialog.
pub trait BookingLauncher {
    fn open_booking(&mut self);
}

#[derive(Debug, Default)]
pub struct BookingDialog {
    open: bool,
    state: BookingState,
}

impl BookingDialog {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn state(&self) -> &BookingState {
        &self.state
    }

    /// Opening shows the entry screen; closing discards all progress.
    pub fn set_open(&mut self, open: bool) {
        if !open {
            self.state = BookingState::default();
        }
        if self.open != open {
            tracing::debug!(open, "booking dialog toggled");
        }
        self.open = open;
    }

    pub fn open(&mut self) {
        self.set_open(true);
    }

    pub fn close(&mut self) {
        self.set_open(false);
    }

    pub fn dispatch(&mut self, action: BookingAction, directory: &TeacherDirectory) {
        if !self.open {
            tracing::debug!(?action, "booking dialog closed, action dropped");
            return;
        }
        if action == BookingAction::Close {
            self.close();
        } else {
            self.state.apply(&action, directory);
        }
    }

    /// Sends the wizard result: returns the chat link and closes the dialog.
    pub fn finish(
        &mut self,
        directory: &TeacherDirectory,
        catalog: &Catalog,
        contact: &ContactChannel,
    ) -> Option<String> {
        if !self.open {
            return None;
        }
        let link = self.state.finish(directory, catalog, contact)?;
        tracing::info!(%link, "booking request link generated");
        self.close();
        Some(link)
    }

    /// Manager screen link; closes the dialog like the wizard finish does.
    pub fn contact_manager(&mut self, catalog: &Catalog, contact: &ContactChannel) -> Option<String> {
        if !self.open || self.state.screen() != BookingScreen::Manager {
            return None;
        }
        let link = manager_link(catalog, contact);
        tracing::info!(%link, "manager contact link generated");
        self.close();
        Some(link)
    }
}

impl BookingLauncher for BookingDialog {
    fn open_booking(&mut self) {
        self.open();
    }
}

#[derive(Debug, Default)]
pub struct QuizDialog {
    open: bool,
    state: QuizState,
}

impl QuizDialog {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn set_open(&mut self, open: bool) {
        if !open {
            self.state = QuizState::default();
        }
        if self.open != open {
            tracing::debug!(open, "level check dialog toggled");
        }
        self.open = open;
    }

    pub fn open(&mut self) {
        self.set_open(true);
    }

    pub fn close(&mut self) {
        self.set_open(false);
    }

    pub fn dispatch(&mut self, action: QuizAction, bank: &PlacementBank) {
        if !self.open {
            tracing::debug!(?action, "level check dialog closed, action dropped");
            return;
        }
        if action == QuizAction::Close {
            self.close();
        } else {
            self.state.apply(&action, bank);
        }
    }

    /// Result-screen call to action: closes the quiz and opens booking.
    /// Returns `false` when there is no result on screen.
    pub fn book_trial_lesson(&mut self, launcher: &mut dyn BookingLauncher) -> bool {
        if !self.open || !self.state.is_submitted() {
            return false;
        }
        self.close();
        launcher.open_booking();
        true
    }
}

/// One language tab of the teacher catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogTab<'a> {
    pub language: &'a LanguageOption,
    pub active: bool,
}

/// Teacher roster browser, one language tab at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeacherCatalog {
    selected: LanguageId,
}

impl Default for TeacherCatalog {
    fn default() -> Self {
        Self {
            selected: LanguageId::En,
        }
    }
}

impl TeacherCatalog {
    pub const TAB_ORDER: [LanguageId; 4] = [
        LanguageId::En,
        LanguageId::Es,
        LanguageId::De,
        LanguageId::Fr,
    ];

    pub fn selected(&self) -> LanguageId {
        self.selected
    }

    pub fn select(&mut self, language: LanguageId) {
        self.selected = language;
    }

    /// Tabs for the languages the directory lists, in catalog order.
    pub fn tabs<'a>(&self, directory: &'a TeacherDirectory) -> Vec<CatalogTab<'a>> {
        Self::TAB_ORDER
            .iter()
            .filter_map(|id| directory.language(*id))
            .map(|language| CatalogTab {
                language,
                active: language.id == self.selected,
            })
            .collect()
    }

    pub fn roster<'a>(&self, directory: &'a TeacherDirectory) -> &'a [TeacherProfile] {
        directory.teachers_for(self.selected)
    }

    pub fn book_lesson(&self, launcher: &mut dyn BookingLauncher) {
        launcher.open_booking();
    }
}

/// Composition root for a visitor session.
#[derive(Debug, Default)]
pub struct SiteSession {
    pub booking: BookingDialog,
    pub quiz: QuizDialog,
    pub catalog: TeacherCatalog,
}

impl SiteSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quiz result call to action.
    pub fn book_from_quiz(&mut self) -> bool {
        self.quiz.book_trial_lesson(&mut self.booking)
    }

    /// Catalog call to action.
    pub fn book_from_catalog(&mut self) {
        self.catalog.book_lesson(&mut self.booking);
    }
}
