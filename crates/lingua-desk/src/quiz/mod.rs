//! Placement level check: pick a language, answer its questions in order,
//! then read off the estimated level.

use std::collections::BTreeMap;

use lingua_catalog::{LanguageId, PlacementBank, PlacementTest, TestQuestion, level_for};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum QuizPhase {
    #[default]
    LanguageSelect,
    Answering {
        language: LanguageId,
        index: usize,
    },
    Scored {
        language: LanguageId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizAction {
    SelectLanguage(LanguageId),
    /// Option id chosen for the current question.
    Answer(String),
    Next,
    Back,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizResult {
    pub language: LanguageId,
    pub correct: usize,
    pub total: usize,
    pub level: String,
}

/// Phase plus the answers recorded for the chosen language, keyed by
/// question id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct QuizState {
    phase: QuizPhase,
    answers: BTreeMap<String, String>,
}

impl QuizState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn language(&self) -> Option<LanguageId> {
        match self.phase {
            QuizPhase::LanguageSelect => None,
            QuizPhase::Answering { language, .. } | QuizPhase::Scored { language } => {
                Some(language)
            }
        }
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.phase, QuizPhase::Scored { .. })
    }

    pub fn answers(&self) -> &BTreeMap<String, String> {
        &self.answers
    }

    pub fn answer_for(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    fn test<'b>(&self, bank: &'b PlacementBank) -> Option<&'b PlacementTest> {
        self.language().and_then(|language| bank.test(language))
    }

    pub fn current_question<'b>(&self, bank: &'b PlacementBank) -> Option<&'b TestQuestion> {
        match self.phase {
            QuizPhase::Answering { language, index } => bank.test(language)?.question(index),
            _ => None,
        }
    }

    /// 1-based position of the current question and the question count.
    pub fn position(&self, bank: &PlacementBank) -> Option<(usize, usize)> {
        match self.phase {
            QuizPhase::Answering { index, .. } => Some((index + 1, self.test(bank)?.len())),
            _ => None,
        }
    }

    pub fn is_last_question(&self, bank: &PlacementBank) -> bool {
        self.position(bank)
            .is_some_and(|(current, total)| current >= total)
    }

    /// "Next" needs an answer for the question on screen.
    pub fn can_go_next(&self, bank: &PlacementBank) -> bool {
        self.current_question(bank)
            .is_some_and(|question| self.answers.contains_key(&question.id))
    }

    pub fn transition(&self, action: &QuizAction, bank: &PlacementBank) -> QuizState {
        let mut next = self.clone();
        next.apply(action, bank);
        next
    }

    pub fn apply(&mut self, action: &QuizAction, bank: &PlacementBank) {
        match (self.phase, action) {
            (_, QuizAction::Close) => *self = Self::default(),
            (QuizPhase::LanguageSelect, QuizAction::SelectLanguage(language)) => {
                if bank.test(*language).is_none_or(PlacementTest::is_empty) {
                    tracing::warn!(%language, "no placement questions for language");
                    return;
                }
                self.answers.clear();
                self.phase = QuizPhase::Answering {
                    language: *language,
                    index: 0,
                };
            }
            (QuizPhase::Answering { .. }, QuizAction::Answer(option_id)) => {
                let Some(question) = self.current_question(bank) else {
                    return;
                };
                if question.option(option_id).is_none() {
                    tracing::debug!(question = %question.id, option = %option_id, "unknown option ignored");
                    return;
                }
                self.answers.insert(question.id.clone(), option_id.clone());
            }
            (QuizPhase::Answering { language, index }, QuizAction::Next) => {
                if !self.can_go_next(bank) {
                    return;
                }
                self.phase = if self.is_last_question(bank) {
                    tracing::debug!(%language, "placement answers submitted");
                    QuizPhase::Scored { language }
                } else {
                    QuizPhase::Answering {
                        language,
                        index: index + 1,
                    }
                };
            }
            (QuizPhase::Answering { language, index }, QuizAction::Back) => {
                self.phase = match index.checked_sub(1) {
                    Some(index) => QuizPhase::Answering { language, index },
                    None => QuizPhase::LanguageSelect,
                };
            }
            (QuizPhase::Scored { language }, QuizAction::Back) => {
                let last = bank
                    .test(language)
                    .map_or(0, |test| test.len().saturating_sub(1));
                self.phase = QuizPhase::Answering {
                    language,
                    index: last,
                };
            }
            (phase, action) => {
                tracing::debug!(?phase, ?action, "quiz action ignored");
            }
        }
    }

    /// Score of the submitted answers; `None` until the quiz is submitted.
    pub fn result(&self, bank: &PlacementBank) -> Option<QuizResult> {
        let QuizPhase::Scored { language } = self.phase else {
            return None;
        };
        let test = bank.test(language)?;
        let correct = test
            .questions
            .iter()
            .filter(|question| {
                self.answer_for(&question.id)
                    .is_some_and(|answer| question.is_correct(answer))
            })
            .count();
        let level = level_for(&test.thresholds, correct)?;
        Some(QuizResult {
            language,
            correct,
            total: test.len(),
            level: level.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank() -> PlacementBank {
        PlacementBank::embedded().expect("embedded bank")
    }

    fn answer_all(state: &mut QuizState, bank: &PlacementBank, correct: usize) {
        while let Some(question) = state.current_question(bank) {
            let (position, _) = state.position(bank).unwrap();
            let option = if position <= correct {
                question.correct_option_id.clone()
            } else {
                question
                    .options
                    .iter()
                    .find(|option| !question.is_correct(&option.id))
                    .unwrap()
                    .id
                    .clone()
            };
            state.apply(&QuizAction::Answer(option), bank);
            state.apply(&QuizAction::Next, bank);
        }
    }

    #[test]
    fn language_choice_starts_at_first_question() {
        let bank = bank();
        let state = QuizState::new().transition(&QuizAction::SelectLanguage(LanguageId::En), &bank);
        assert_eq!(
            state.phase(),
            QuizPhase::Answering {
                language: LanguageId::En,
                index: 0
            }
        );
        assert_eq!(state.position(&bank), Some((1, 20)));
        assert!(!state.can_go_next(&bank));
    }

    #[test]
    fn unknown_option_is_ignored() {
        let bank = bank();
        let state = QuizState::new().transition(&QuizAction::SelectLanguage(LanguageId::De), &bank);
        let after = state.transition(&QuizAction::Answer("z".into()), &bank);
        assert_eq!(after, state);
    }

    #[test]
    fn reanswering_overwrites_only_current_question() {
        let bank = bank();
        let mut state = QuizState::new();
        state.apply(&QuizAction::SelectLanguage(LanguageId::En), &bank);
        state.apply(&QuizAction::Answer("a".into()), &bank);
        state.apply(&QuizAction::Next, &bank);
        state.apply(&QuizAction::Answer("b".into()), &bank);
        state.apply(&QuizAction::Answer("c".into()), &bank);
        assert_eq!(state.answer_for("en-1"), Some("a"));
        assert_eq!(state.answer_for("en-2"), Some("c"));
        assert_eq!(state.answers().len(), 2);
    }

    #[test]
    fn back_keeps_answers_and_leaves_at_first_question() {
        let bank = bank();
        let mut state = QuizState::new();
        state.apply(&QuizAction::SelectLanguage(LanguageId::Fr), &bank);
        state.apply(&QuizAction::Answer("b".into()), &bank);
        state.apply(&QuizAction::Next, &bank);
        state.apply(&QuizAction::Back, &bank);
        assert_eq!(state.answer_for("fr-1"), Some("b"));
        assert!(state.can_go_next(&bank));
        state.apply(&QuizAction::Back, &bank);
        assert_eq!(state.phase(), QuizPhase::LanguageSelect);
    }

    #[test]
    fn perfect_run_scores_top_level() {
        let bank = bank();
        let mut state = QuizState::new();
        state.apply(&QuizAction::SelectLanguage(LanguageId::Es), &bank);
        answer_all(&mut state, &bank, 20);
        let result = state.result(&bank).expect("scored");
        assert_eq!((result.correct, result.total), (20, 20));
        assert_eq!(result.level, "C1");
        assert_eq!(state.result(&bank), Some(result));
    }

    #[test]
    fn back_from_result_returns_to_last_question() {
        let bank = bank();
        let mut state = QuizState::new();
        state.apply(&QuizAction::SelectLanguage(LanguageId::En), &bank);
        answer_all(&mut state, &bank, 6);
        assert_eq!(state.result(&bank).unwrap().level, "A2");
        state.apply(&QuizAction::Back, &bank);
        assert_eq!(state.position(&bank), Some((20, 20)));
        assert!(state.result(&bank).is_none());
    }

    #[test]
    fn choosing_a_language_again_clears_answers() {
        let bank = bank();
        let mut state = QuizState::new();
        state.apply(&QuizAction::SelectLanguage(LanguageId::En), &bank);
        state.apply(&QuizAction::Answer("a".into()), &bank);
        state.apply(&QuizAction::Back, &bank);
        state.apply(&QuizAction::SelectLanguage(LanguageId::De), &bank);
        assert!(state.answers().is_empty());
    }
}
