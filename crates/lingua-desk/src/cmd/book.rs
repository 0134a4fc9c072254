use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;
use lingua_catalog::{GoalId, LanguageId, TeacherId};
use serde::{Deserialize, Serialize};

use crate::booking::{BookingAction, BookingScreen, BookingSelection, WizardStep};
use crate::cmd::DeskContext;
use crate::cmd::prompt::{Choice, Pick, Prompter};
use crate::session::{BookingDialog, SiteSession};

#[derive(Args, Debug, Clone, Default)]
pub struct BookArgs {
    /// Replay a booking from a JSON answers file instead of prompting
    #[arg(long = "answers", value_name = "answers.json")]
    pub answers: Option<PathBuf>,
    #[arg(long = "json", default_value_t = false)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingRoute {
    SelfServe,
    Manager,
}

/// Non-interactive booking input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BookingAnswers {
    pub route: BookingRoute,
    #[serde(default)]
    pub language: Option<LanguageId>,
    #[serde(default)]
    pub goal: Option<GoalId>,
    #[serde(default)]
    pub teacher: Option<TeacherId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingOutcome {
    pub route: BookingRoute,
    pub selection: BookingSelection,
    pub link: String,
}

pub fn run<R: BufRead, W: Write>(
    args: &BookArgs,
    ctx: &DeskContext,
    session: &mut SiteSession,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    session.booking.open();
    let outcome = match &args.answers {
        Some(path) => Some(replay(&load_answers(path)?, ctx, &mut session.booking)?),
        None => interact(ctx, &mut session.booking, prompter)?,
    };
    report(outcome.as_ref(), args.json, ctx, prompter)
}

pub fn load_answers(path: &Path) -> Result<BookingAnswers> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read booking answers {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("booking answers {} must be valid JSON", path.display()))
}

/// Drives an open dialog through `answers` and returns the generated link.
pub fn replay(
    answers: &BookingAnswers,
    ctx: &DeskContext,
    dialog: &mut BookingDialog,
) -> Result<BookingOutcome> {
    if answers.route == BookingRoute::Manager {
        dialog.dispatch(BookingAction::ContactManager, &ctx.directory);
        let link = dialog
            .contact_manager(&ctx.catalog, &ctx.contact)
            .context("booking dialog did not reach the manager screen")?;
        return Ok(BookingOutcome {
            route: BookingRoute::Manager,
            selection: BookingSelection::default(),
            link,
        });
    }

    let language = answers.language.context("booking answers must name a language")?;
    if !ctx
        .directory
        .booking_options()
        .iter()
        .any(|option| option.id == language)
    {
        bail!("language '{language}' is not offered for booking");
    }
    let goal = answers.goal.context("booking answers must name a goal")?;
    if ctx.directory.goal(goal).is_none() {
        bail!("goal '{goal}' is not listed");
    }
    let teacher = answers
        .teacher
        .clone()
        .context("booking answers must name a teacher")?;
    if ctx.directory.teacher(&teacher).is_none() {
        bail!("unknown teacher '{teacher}'");
    }

    for action in [
        BookingAction::SelfServe,
        BookingAction::SelectLanguage(language),
        BookingAction::Next,
        BookingAction::SelectGoal(goal),
        BookingAction::Next,
        BookingAction::SelectTeacher(teacher),
    ] {
        dialog.dispatch(action, &ctx.directory);
    }
    let selection = dialog.state().selection().clone();
    let link = dialog
        .finish(&ctx.directory, &ctx.catalog, &ctx.contact)
        .context("booking answers are incomplete")?;
    Ok(BookingOutcome {
        route: BookingRoute::SelfServe,
        selection,
        link,
    })
}

/// Prompts through the dialog until a link is produced or the visitor
/// closes it.
pub fn interact<R: BufRead, W: Write>(
    ctx: &DeskContext,
    dialog: &mut BookingDialog,
    prompter: &mut Prompter<R, W>,
) -> Result<Option<BookingOutcome>> {
    let catalog = &ctx.catalog;
    let select = catalog.tr("prompt.select");
    while dialog.is_open() {
        let state = dialog.state().clone();
        let header = state.header(catalog);
        prompter.say("")?;
        prompter.say(&format!("{} · {}", catalog.tr("booking.kicker"), header.title))?;
        prompter.say(&header.subtitle)?;

        let pick = match state.screen() {
            BookingScreen::Entry => {
                let choices = [
                    Choice::new("self", catalog.tr("booking.entry.self_serve")),
                    Choice::new("manager", catalog.tr("booking.entry.manager")),
                ];
                let pick = prompter.choose(&select, &choices, catalog)?;
                match pick {
                    Pick::Index(0) => dialog.dispatch(BookingAction::SelfServe, &ctx.directory),
                    Pick::Index(_) => {
                        dialog.dispatch(BookingAction::ContactManager, &ctx.directory)
                    }
                    _ => {}
                }
                pick
            }
            BookingScreen::Wizard(WizardStep::Language) => {
                prompter.say(&catalog.tr("booking.step.language"))?;
                let options = ctx.directory.booking_options();
                let choices: Vec<_> = options
                    .iter()
                    .map(|option| {
                        let marker = marker(state.selection().language() == Some(option.id));
                        let label = format!("{} {} · {}{marker}", option.badge, option.title, option.desc);
                        Choice::new(option.id.code(), label)
                    })
                    .collect();
                let pick = prompter.choose(&select, &choices, catalog)?;
                if let Pick::Index(idx) = pick {
                    dialog.dispatch(
                        BookingAction::SelectLanguage(options[idx].id),
                        &ctx.directory,
                    );
                    dialog.dispatch(BookingAction::Next, &ctx.directory);
                }
                pick
            }
            BookingScreen::Wizard(WizardStep::Goal) => {
                prompter.say(&catalog.tr("booking.step.goal"))?;
                let goals = &ctx.directory.goals;
                let choices: Vec<_> = goals
                    .iter()
                    .map(|goal| {
                        let marker = marker(state.selection().goal() == Some(goal.id));
                        Choice::new(goal.id.code(), format!("{} · {}{marker}", goal.title, goal.desc))
                    })
                    .collect();
                prompter.say(&catalog.tr("booking.step.goal_hint"))?;
                let pick = prompter.choose(&select, &choices, catalog)?;
                if let Pick::Index(idx) = pick {
                    dialog.dispatch(BookingAction::SelectGoal(goals[idx].id), &ctx.directory);
                    dialog.dispatch(BookingAction::Next, &ctx.directory);
                }
                pick
            }
            BookingScreen::Wizard(WizardStep::Teacher) => {
                prompter.say(&catalog.tr("booking.step.teacher"))?;
                let cards = state.teacher_cards(&ctx.directory);
                let recommended = catalog.tr("booking.teacher.recommended");
                let choices: Vec<_> = cards
                    .iter()
                    .map(|card| {
                        let mut label = format!("{} · {}", card.teacher.name, card.teacher.headline);
                        if card.recommended {
                            label.push_str(&format!(" [{recommended}]"));
                        }
                        label.push_str(marker(card.selected));
                        Choice::new(card.teacher.id.as_str(), label)
                    })
                    .collect();
                prompter.say(&catalog.tr("booking.step.teacher_hint"))?;
                let pick = prompter.choose(&select, &choices, catalog)?;
                if let Pick::Index(idx) = pick {
                    let teacher = cards[idx].teacher.id.clone();
                    dialog.dispatch(BookingAction::SelectTeacher(teacher), &ctx.directory);
                    let selection = dialog.state().selection().clone();
                    if let Some(link) = dialog.finish(&ctx.directory, catalog, &ctx.contact) {
                        return Ok(Some(BookingOutcome {
                            route: BookingRoute::SelfServe,
                            selection,
                            link,
                        }));
                    }
                }
                pick
            }
            BookingScreen::Manager => {
                prompter.say(&catalog.tr("booking.manager.body"))?;
                prompter.say(&catalog.tr("booking.manager.reply_note"))?;
                if prompter.confirm(&catalog.tr("booking.manager.open_prompt"), true, catalog)?
                    && let Some(link) = dialog.contact_manager(catalog, &ctx.contact)
                {
                    return Ok(Some(BookingOutcome {
                        route: BookingRoute::Manager,
                        selection: BookingSelection::default(),
                        link,
                    }));
                }
                Pick::Back
            }
        };

        match pick {
            Pick::Back => dialog.dispatch(BookingAction::Back, &ctx.directory),
            Pick::Close => dialog.dispatch(BookingAction::Close, &ctx.directory),
            Pick::Index(_) => {}
        }
    }
    Ok(None)
}

fn marker(selected: bool) -> &'static str {
    if selected { " ✓" } else { "" }
}

pub fn report<R: BufRead, W: Write>(
    outcome: Option<&BookingOutcome>,
    json: bool,
    ctx: &DeskContext,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    if json {
        return prompter.say(&serde_json::to_string_pretty(&outcome)?);
    }
    match outcome {
        Some(outcome) => prompter.say(&ctx.catalog.trf("booking.result.link", &[&outcome.link])),
        None => prompter.say(&ctx.catalog.tr("booking.result.closed")),
    }
}
