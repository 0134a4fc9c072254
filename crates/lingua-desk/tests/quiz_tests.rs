use lingua_catalog::{LanguageId, PlacementBank};
use lingua_desk::quiz::{QuizAction, QuizPhase, QuizState};
use lingua_desk::session::{BookingLauncher, QuizDialog, SiteSession};
use proptest::prelude::*;

fn bank() -> PlacementBank {
    PlacementBank::embedded().expect("embedded bank")
}

fn action_strategy() -> impl Strategy<Value = QuizAction> {
    prop_oneof![
        prop::sample::select(LanguageId::ALL.to_vec()).prop_map(QuizAction::SelectLanguage),
        prop::sample::select(vec!["a", "b", "c", "d", "e"])
            .prop_map(|id| QuizAction::Answer(id.to_string())),
        Just(QuizAction::Next),
        Just(QuizAction::Next),
        Just(QuizAction::Back),
        Just(QuizAction::Close),
    ]
}

proptest! {
    #[test]
    fn index_stays_in_range_and_next_needs_an_answer(
        actions in prop::collection::vec(action_strategy(), 0..120)
    ) {
        let bank = bank();
        let mut state = QuizState::new();
        for action in &actions {
            let before = state.clone();
            state.apply(action, &bank);
            if let QuizPhase::Answering { language, index } = state.phase() {
                prop_assert!(index < bank.test(language).unwrap().len());
            }
            if *action == QuizAction::Next && !before.can_go_next(&bank) {
                prop_assert_eq!(&state, &before);
            }
            let keyed_to_language = state.answers().keys().all(|id| {
                state.language().is_none_or(|language| id.starts_with(language.code()))
            });
            prop_assert!(keyed_to_language);
        }
    }

    #[test]
    fn score_counts_exact_matches(picks in prop::collection::vec(0usize..4, 20)) {
        let bank = bank();
        let test = bank.test(LanguageId::En).unwrap();
        let mut state = QuizState::new();
        state.apply(&QuizAction::SelectLanguage(LanguageId::En), &bank);
        let mut expected = 0;
        for (question, pick) in test.questions.iter().zip(&picks) {
            let option = &question.options[*pick];
            if question.is_correct(&option.id) {
                expected += 1;
            }
            state.apply(&QuizAction::Answer(option.id.clone()), &bank);
            state.apply(&QuizAction::Next, &bank);
        }
        let result = state.result(&bank).expect("all questions answered");
        prop_assert_eq!(result.correct, expected);
        prop_assert_eq!(result.total, 20);
        prop_assert_eq!(state.result(&bank), Some(result));
    }
}

#[test]
fn english_answer_key_scores_every_level() {
    let bank = bank();
    let key = [
        "a", "b", "c", "b", "c", "b", "d", "a", "c", "a", "b", "c", "b", "c", "b", "b", "b", "c",
        "b", "b",
    ];
    for (correct, level) in [(0, "A1"), (5, "A1"), (6, "A2"), (10, "A2"), (11, "B1"), (16, "B2"), (19, "B2"), (20, "C1")] {
        let mut state = QuizState::new();
        state.apply(&QuizAction::SelectLanguage(LanguageId::En), &bank);
        for (idx, answer) in key.iter().enumerate() {
            let chosen = if idx < correct {
                answer.to_string()
            } else if *answer == "a" {
                "b".to_string()
            } else {
                "a".to_string()
            };
            state.apply(&QuizAction::Answer(chosen), &bank);
            state.apply(&QuizAction::Next, &bank);
        }
        let result = state.result(&bank).unwrap();
        assert_eq!(result.correct, correct);
        assert_eq!(result.level, level, "{correct} correct answers");
    }
}

#[test]
fn last_question_submits_instead_of_advancing() {
    let bank = bank();
    let mut state = QuizState::new();
    state.apply(&QuizAction::SelectLanguage(LanguageId::Fr), &bank);
    for _ in 0..19 {
        state.apply(&QuizAction::Answer("a".into()), &bank);
        state.apply(&QuizAction::Next, &bank);
    }
    assert!(state.is_last_question(&bank));
    assert!(!state.is_submitted());
    state.apply(&QuizAction::Next, &bank);
    assert!(!state.is_submitted());
    state.apply(&QuizAction::Answer("a".into()), &bank);
    state.apply(&QuizAction::Next, &bank);
    assert_eq!(state.phase(), QuizPhase::Scored { language: LanguageId::Fr });
}

struct Recorder(Vec<&'static str>);

impl BookingLauncher for Recorder {
    fn open_booking(&mut self) {
        self.0.push("booking");
    }
}

#[test]
fn result_cta_closes_quiz_then_opens_booking() {
    let bank = bank();
    let mut quiz = QuizDialog::default();
    quiz.open();
    quiz.dispatch(QuizAction::SelectLanguage(LanguageId::De), &bank);
    for _ in 0..20 {
        quiz.dispatch(QuizAction::Answer("a".into()), &bank);
        quiz.dispatch(QuizAction::Next, &bank);
    }
    assert!(quiz.state().is_submitted());
    let mut launcher = Recorder(Vec::new());
    assert!(quiz.book_trial_lesson(&mut launcher));
    assert_eq!(launcher.0, vec!["booking"]);
    assert!(!quiz.is_open());
    assert_eq!(quiz.state(), &QuizState::default());
}

#[test]
fn session_wires_quiz_cta_to_its_booking_dialog() {
    let bank = bank();
    let mut session = SiteSession::new();
    session.quiz.open();
    session.quiz.dispatch(QuizAction::SelectLanguage(LanguageId::Es), &bank);
    for _ in 0..20 {
        session.quiz.dispatch(QuizAction::Answer("b".into()), &bank);
        session.quiz.dispatch(QuizAction::Next, &bank);
    }
    assert!(session.book_from_quiz());
    assert!(session.booking.is_open());
    assert!(!session.quiz.is_open());
}

#[test]
fn closing_mid_test_resets_on_reopen() {
    let bank = bank();
    let mut quiz = QuizDialog::default();
    quiz.open();
    quiz.dispatch(QuizAction::SelectLanguage(LanguageId::En), &bank);
    quiz.dispatch(QuizAction::Answer("a".into()), &bank);
    quiz.dispatch(QuizAction::Close, &bank);
    quiz.open();
    assert_eq!(quiz.state().phase(), QuizPhase::LanguageSelect);
    assert!(quiz.state().answers().is_empty());
}
