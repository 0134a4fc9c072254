use std::io::{BufRead, Write};

use anyhow::Result;
use clap::Args;
use lingua_catalog::LanguageId;

use crate::cmd::DeskContext;
use crate::cmd::prompt::Prompter;
use crate::session::SiteSession;

#[derive(Args, Debug, Clone, Default)]
pub struct TeachersArgs {
    /// Language tab to show (default: en)
    #[arg(long = "language", value_name = "LANG")]
    pub language: Option<LanguageId>,
    #[arg(long = "json", default_value_t = false)]
    pub json: bool,
}

pub fn run<R: BufRead, W: Write>(
    args: &TeachersArgs,
    ctx: &DeskContext,
    session: &mut SiteSession,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    if let Some(language) = args.language {
        session.catalog.select(language);
    }
    let roster = session.catalog.roster(&ctx.directory);
    if args.json {
        return prompter.say(&serde_json::to_string_pretty(roster)?);
    }

    let catalog = &ctx.catalog;
    prompter.say(&catalog.tr("catalog.title"))?;
    let tabs = session
        .catalog
        .tabs(&ctx.directory)
        .iter()
        .map(|tab| {
            let label = format!("{} {}", tab.language.badge, tab.language.title);
            if tab.active { format!("[{label}]") } else { label }
        })
        .collect::<Vec<_>>();
    prompter.say(&tabs.join("  "))?;
    prompter.say("")?;

    if roster.is_empty() {
        return prompter.say(&catalog.tr("catalog.empty"));
    }
    for teacher in roster {
        prompter.say(&format!(
            "{:>3}  {} · {}",
            teacher.initials(),
            teacher.name,
            teacher.headline
        ))?;
        prompter.say(&format!("     {}", teacher.description))?;
        if !teacher.tags.is_empty() {
            let tags = teacher.tags.join(" · ");
            prompter.say(&format!("     {}", catalog.trf("catalog.tags", &[&tags])))?;
        }
    }
    Ok(())
}
