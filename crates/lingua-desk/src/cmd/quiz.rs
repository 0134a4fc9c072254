use std::collections::BTreeMap;
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;
use lingua_catalog::LanguageId;
use serde::{Deserialize, Serialize};

use crate::cmd::DeskContext;
use crate::cmd::book::{self, BookingOutcome};
use crate::cmd::prompt::{Choice, Pick, Prompter};
use crate::quiz::{QuizAction, QuizPhase, QuizResult};
use crate::session::{QuizDialog, SiteSession};

#[derive(Args, Debug, Clone, Default)]
pub struct QuizArgs {
    /// Skip the language screen
    #[arg(long = "language", value_name = "LANG")]
    pub language: Option<LanguageId>,
    /// Score answers from a JSON file instead of prompting
    #[arg(long = "answers", value_name = "answers.json")]
    pub answers: Option<PathBuf>,
    #[arg(long = "json", default_value_t = false)]
    pub json: bool,
}

/// Non-interactive quiz input: option ids keyed by question id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuizAnswers {
    pub language: LanguageId,
    #[serde(default)]
    pub answers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizOutcome {
    #[serde(flatten)]
    pub result: QuizResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<BookingOutcome>,
}

pub fn run<R: BufRead, W: Write>(
    args: &QuizArgs,
    ctx: &DeskContext,
    session: &mut SiteSession,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    session.quiz.open();
    let outcome = match &args.answers {
        Some(path) => {
            let answers = load_answers(path)?;
            let result = replay(&answers, ctx, &mut session.quiz)?;
            session.quiz.close();
            Some(QuizOutcome {
                result,
                booking: None,
            })
        }
        None => interact(args.language, ctx, session, prompter)?,
    };
    report(outcome.as_ref(), args.json, ctx, prompter)
}

pub fn load_answers(path: &Path) -> Result<QuizAnswers> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz answers {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("quiz answers {} must be valid JSON", path.display()))
}

/// Answers every question of `answers.language` in order and scores them.
pub fn replay(
    answers: &QuizAnswers,
    ctx: &DeskContext,
    dialog: &mut QuizDialog,
) -> Result<QuizResult> {
    let bank = &ctx.bank;
    dialog.dispatch(QuizAction::SelectLanguage(answers.language), bank);
    while let Some(question) = dialog.state().current_question(bank) {
        let option = answers
            .answers
            .get(&question.id)
            .with_context(|| format!("no answer for question {}", question.id))?;
        dialog.dispatch(QuizAction::Answer(option.clone()), bank);
        if dialog.state().answer_for(&question.id) != Some(option.as_str()) {
            bail!("question {} has no option '{option}'", question.id);
        }
        dialog.dispatch(QuizAction::Next, bank);
    }
    dialog
        .state()
        .result(bank)
        .with_context(|| format!("no placement test for {}", answers.language))
}

pub fn interact<R: BufRead, W: Write>(
    language: Option<LanguageId>,
    ctx: &DeskContext,
    session: &mut SiteSession,
    prompter: &mut Prompter<R, W>,
) -> Result<Option<QuizOutcome>> {
    let catalog = &ctx.catalog;
    let bank = &ctx.bank;
    if let Some(language) = language {
        session
            .quiz
            .dispatch(QuizAction::SelectLanguage(language), bank);
    }
    prompter.say(&catalog.tr("quiz.title"))?;
    prompter.say(&catalog.tr("quiz.subtitle"))?;

    while session.quiz.is_open() {
        let state = session.quiz.state().clone();
        prompter.say("")?;
        let pick = match state.phase() {
            QuizPhase::LanguageSelect => {
                prompter.say(&catalog.tr("quiz.language.prompt"))?;
                let languages = bank.languages();
                let choices: Vec<_> = languages
                    .iter()
                    .map(|language| {
                        Choice::new(
                            language.id.code(),
                            format!("{} {}", language.badge, language.title),
                        )
                    })
                    .collect();
                let pick = prompter.choose(&catalog.tr("prompt.select"), &choices, catalog)?;
                if let Pick::Index(idx) = pick {
                    session
                        .quiz
                        .dispatch(QuizAction::SelectLanguage(languages[idx].id), bank);
                }
                pick
            }
            QuizPhase::Answering { language, .. } => {
                let question = state
                    .current_question(bank)
                    .context("current question is out of range")?;
                let (current, total) = state.position(bank).unwrap_or((0, 0));
                let title = bank.test(language).map_or("", |test| test.title.as_str());
                prompter.say(&catalog.trf(
                    "quiz.question.position",
                    &[title, &current.to_string(), &total.to_string()],
                ))?;
                prompter.say(&question.prompt)?;
                let recorded = state.answer_for(&question.id);
                let choices: Vec<_> = question
                    .options
                    .iter()
                    .map(|option| {
                        let marker = if recorded == Some(option.id.as_str()) { " ✓" } else { "" };
                        Choice::new(&option.id, format!("{}) {}{marker}", option.id, option.text))
                    })
                    .collect();
                let pick =
                    prompter.choose(&catalog.tr("prompt.select_answer"), &choices, catalog)?;
                if let Pick::Index(idx) = pick {
                    let option = question.options[idx].id.clone();
                    session.quiz.dispatch(QuizAction::Answer(option), bank);
                    session.quiz.dispatch(QuizAction::Next, bank);
                }
                pick
            }
            QuizPhase::Scored { .. } => {
                let result = state.result(bank).context("placement test was not scored")?;
                prompter.say(&catalog.trf("quiz.result.level", &[&result.level]))?;
                prompter.say(&catalog.trf(
                    "quiz.result.correct",
                    &[&result.correct.to_string(), &result.total.to_string()],
                ))?;
                let choices = [
                    Choice::new("book", catalog.tr("quiz.result.book")),
                    Choice::new("finish", catalog.tr("quiz.result.finish")),
                ];
                let pick = prompter.choose(&catalog.tr("prompt.select"), &choices, catalog)?;
                match pick {
                    Pick::Index(0) => {
                        session.book_from_quiz();
                        let booking = book::interact(ctx, &mut session.booking, prompter)?;
                        return Ok(Some(QuizOutcome { result, booking }));
                    }
                    Pick::Index(_) | Pick::Close => {
                        session.quiz.close();
                        return Ok(Some(QuizOutcome {
                            result,
                            booking: None,
                        }));
                    }
                    Pick::Back => pick,
                }
            }
        };

        match pick {
            Pick::Back => session.quiz.dispatch(QuizAction::Back, bank),
            Pick::Close => session.quiz.dispatch(QuizAction::Close, bank),
            Pick::Index(_) => {}
        }
    }
    Ok(None)
}

pub fn report<R: BufRead, W: Write>(
    outcome: Option<&QuizOutcome>,
    json: bool,
    ctx: &DeskContext,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    if json {
        return prompter.say(&serde_json::to_string_pretty(&outcome)?);
    }
    let Some(outcome) = outcome else {
        return prompter.say(&ctx.catalog.tr("quiz.result.closed"));
    };
    let result = &outcome.result;
    prompter.say(&ctx.catalog.trf("quiz.result.level", &[&result.level]))?;
    prompter.say(&ctx.catalog.trf(
        "quiz.result.correct",
        &[&result.correct.to_string(), &result.total.to_string()],
    ))?;
    if let Some(booking) = &outcome.booking {
        prompter.say(&ctx.catalog.trf("booking.result.link", &[&booking.link]))?;
    }
    Ok(())
}
