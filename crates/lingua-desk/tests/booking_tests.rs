use lingua_catalog::{GoalId, LanguageId, TeacherDirectory, TeacherId};
use lingua_desk::booking::{BookingAction, BookingScreen, BookingState, WizardStep, manager_link};
use lingua_desk::contact::ContactChannel;
use lingua_desk::i18n::Catalog;
use proptest::prelude::*;

fn directory() -> TeacherDirectory {
    TeacherDirectory::embedded().expect("embedded directory")
}

fn action_strategy() -> impl Strategy<Value = BookingAction> {
    prop_oneof![
        Just(BookingAction::SelfServe),
        Just(BookingAction::ContactManager),
        prop::sample::select(LanguageId::ALL.to_vec()).prop_map(BookingAction::SelectLanguage),
        prop::sample::select(GoalId::ALL.to_vec()).prop_map(BookingAction::SelectGoal),
        prop::sample::select(vec!["anna", "oleh", "maria", "sofia", "nobody"])
            .prop_map(|id| BookingAction::SelectTeacher(TeacherId::from(id))),
        Just(BookingAction::Next),
        Just(BookingAction::Back),
        Just(BookingAction::Close),
    ]
}

proptest! {
    #[test]
    fn downstream_fields_never_outlive_upstream(actions in prop::collection::vec(action_strategy(), 0..40)) {
        let directory = directory();
        let offered: Vec<_> = directory.booking_options().iter().map(|option| option.id).collect();
        let mut state = BookingState::new();
        for action in &actions {
            let before = state.clone();
            state.apply(action, &directory);
            let selection = state.selection();
            prop_assert!(selection.teacher().is_none() || selection.goal().is_some());
            prop_assert!(selection.goal().is_none() || selection.language().is_some());
            prop_assert!(selection.language().is_none_or(|language| offered.contains(&language)));
            prop_assert!(selection.teacher().is_none_or(|id| directory.teacher(id).is_some()));
            if let BookingAction::SelectLanguage(language) = action
                && before.screen() == BookingScreen::Wizard(WizardStep::Language)
                && offered.contains(language)
            {
                prop_assert_eq!(selection.language(), Some(*language));
                prop_assert!(selection.goal().is_none());
                prop_assert!(selection.teacher().is_none());
            }
            if *action == BookingAction::Close {
                prop_assert_eq!(&state, &BookingState::default());
            }
        }
    }

    #[test]
    fn wizard_progress_matches_step(actions in prop::collection::vec(action_strategy(), 0..40)) {
        let directory = directory();
        let mut state = BookingState::new();
        for action in &actions {
            state.apply(action, &directory);
            let expected = match state.screen() {
                BookingScreen::Wizard(WizardStep::Language) => 33,
                BookingScreen::Wizard(WizardStep::Goal) => 67,
                BookingScreen::Wizard(WizardStep::Teacher) => 100,
                _ => 0,
            };
            prop_assert_eq!(state.progress_percent(), expected);
            if state.can_finish() {
                prop_assert!(state.selection().is_complete());
            }
        }
    }
}

#[test]
fn reselecting_language_clears_goal_and_teacher() {
    let directory = directory();
    let mut state = BookingState::new();
    for action in [
        BookingAction::SelfServe,
        BookingAction::SelectLanguage(LanguageId::En),
        BookingAction::Next,
        BookingAction::SelectGoal(GoalId::Work),
        BookingAction::Next,
        BookingAction::SelectTeacher(TeacherId::from("oleh")),
        BookingAction::Back,
        BookingAction::Back,
        BookingAction::SelectLanguage(LanguageId::En),
    ] {
        state.apply(&action, &directory);
    }
    assert_eq!(state.selection().language(), Some(LanguageId::En));
    assert_eq!(state.selection().goal(), None);
    assert_eq!(state.selection().teacher(), None);
    assert!(state.can_go_next());
}

#[test]
fn header_follows_screen() {
    let directory = directory();
    let catalog = Catalog::for_locale("en");
    let mut state = BookingState::new();
    assert_eq!(state.header(&catalog).title, "How would you like to continue?");
    state.apply(&BookingAction::SelfServe, &directory);
    let header = state.header(&catalog);
    assert_eq!(header.title, "Quick match");
    assert_eq!(header.subtitle, "Step 1/3");
    assert_eq!(header.progress_percent, 33);
    state.apply(&BookingAction::Back, &directory);
    state.apply(&BookingAction::ContactManager, &directory);
    assert_eq!(state.header(&catalog).title, "Contact a manager");
}

#[test]
fn teacher_cards_flag_recommendation_and_selection() {
    let directory = directory();
    let mut state = BookingState::new();
    for action in [
        BookingAction::SelfServe,
        BookingAction::SelectLanguage(LanguageId::De),
        BookingAction::Next,
        BookingAction::SelectGoal(GoalId::Move),
        BookingAction::Next,
        BookingAction::SelectTeacher(TeacherId::from("taras")),
    ] {
        state.apply(&action, &directory);
    }
    let cards = state.teacher_cards(&directory);
    assert_eq!(cards.len(), directory.teachers().len());
    let flags: Vec<_> = cards
        .iter()
        .filter(|card| card.recommended || card.selected)
        .map(|card| (card.teacher.id.as_str(), card.recommended, card.selected))
        .collect();
    assert_eq!(flags, vec![("anna", true, false), ("taras", false, true)]);
}

#[test]
fn finish_is_withheld_until_complete() {
    let directory = directory();
    let catalog = Catalog::for_locale("en");
    let contact = ContactChannel::new("https://t.me/school");
    let state = BookingState::new()
        .transition(&BookingAction::SelfServe, &directory)
        .transition(&BookingAction::SelectLanguage(LanguageId::Fr), &directory)
        .transition(&BookingAction::Next, &directory)
        .transition(&BookingAction::SelectGoal(GoalId::Life), &directory)
        .transition(&BookingAction::Next, &directory);
    assert_eq!(state.finish(&directory, &catalog, &contact), None);
    let done = state.transition(
        &BookingAction::SelectTeacher(TeacherId::from("maria")),
        &directory,
    );
    let link = done.finish(&directory, &catalog, &contact).unwrap();
    assert!(link.starts_with("https://t.me/school?text=Hi!%20"));
}

#[test]
fn manager_link_carries_only_the_greeting() {
    let catalog = Catalog::for_locale("uk");
    let link = manager_link(&catalog, &ContactChannel::new("https://t.me/school"));
    assert!(link.starts_with("https://t.me/school?text="));
    assert!(!link.contains("%0A"));
}

#[test]
fn spanish_is_not_bookable_even_though_it_has_teachers() {
    let directory = directory();
    let catalog = Catalog::for_locale("en");
    let contact = ContactChannel::new("https://t.me/school");
    let state = BookingState::new()
        .transition(&BookingAction::SelfServe, &directory)
        .transition(&BookingAction::SelectLanguage(LanguageId::Es), &directory)
        .transition(&BookingAction::Next, &directory)
        .transition(&BookingAction::SelectGoal(GoalId::Life), &directory)
        .transition(&BookingAction::Next, &directory)
        .transition(&BookingAction::SelectTeacher(TeacherId::from("sofia")), &directory);
    assert_eq!(state.screen(), BookingScreen::Wizard(WizardStep::Language));
    assert_eq!(state.selection().language(), None);
    assert_eq!(state.finish(&directory, &catalog, &contact), None);
}

#[test]
fn unlisted_teacher_never_reaches_the_message() {
    let directory = directory();
    let catalog = Catalog::for_locale("en");
    let contact = ContactChannel::new("https://t.me/school");
    let state = BookingState::new()
        .transition(&BookingAction::SelfServe, &directory)
        .transition(&BookingAction::SelectLanguage(LanguageId::En), &directory)
        .transition(&BookingAction::Next, &directory)
        .transition(&BookingAction::SelectGoal(GoalId::Exam), &directory)
        .transition(&BookingAction::Next, &directory)
        .transition(&BookingAction::SelectTeacher(TeacherId::from("nobody")), &directory);
    assert!(!state.can_finish());
    assert_eq!(state.finish(&directory, &catalog, &contact), None);

    let link = state
        .transition(&BookingAction::SelectTeacher(TeacherId::from("sofia")), &directory)
        .finish(&directory, &catalog, &contact)
        .unwrap();
    assert!(!link.contains("%E2%80%94"));
}
