use std::io::{BufRead, Write};

use anyhow::Result;
use clap::Args;

use crate::cmd::DeskContext;
use crate::cmd::prompt::Prompter;
use crate::contact::greeting;

#[derive(Args, Debug, Clone, Default)]
pub struct LinkArgs {
    /// Message to pre-fill; defaults to the booking greeting
    #[arg(long = "text", value_name = "TEXT")]
    pub text: Option<String>,
}

pub fn run<R: BufRead, W: Write>(
    args: &LinkArgs,
    ctx: &DeskContext,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let text = args
        .text
        .clone()
        .unwrap_or_else(|| greeting(&ctx.catalog));
    prompter.say(&ctx.contact.link_with_text(&text))
}
