use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::{
    self, DeskContext, book::BookArgs, link::LinkArgs, prompt::Prompter, quiz::QuizArgs,
    teachers::TeachersArgs,
};
use crate::config::DeskConfig;
use crate::i18n;
use crate::session::SiteSession;

pub const LOG_ENV: &str = "LINGUA_DESK_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "lingua-desk",
    about = "Book a trial lesson or check your language level",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    #[arg(long = "locale", value_name = "LOCALE", global = true)]
    locale: Option<String>,

    /// Config file; defaults to the platform config directory
    #[arg(long = "config", value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Chat URL booking requests are sent through
    #[arg(long = "contact-url", value_name = "URL", global = true)]
    contact_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pick a language, goal and teacher, or contact a manager
    Book(BookArgs),
    /// Take a placement test and get an estimated level
    Quiz(QuizArgs),
    /// Browse the teacher roster by language
    Teachers(TeachersArgs),
    /// Print a chat link with pre-filled text
    Link(LinkArgs),
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = DeskConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.contact_url {
        config.contact_url = url;
    }
    let locale = i18n::select_locale(cli.locale.as_deref().or(config.locale.as_deref()));
    tracing::debug!(%locale, contact_url = %config.contact_url, "desk configured");
    let ctx = DeskContext::load(&config, &locale)?;

    let mut session = SiteSession::new();
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    match cli.command {
        Commands::Book(args) => cmd::book::run(&args, &ctx, &mut session, &mut prompter),
        Commands::Quiz(args) => cmd::quiz::run(&args, &ctx, &mut session, &mut prompter),
        Commands::Teachers(args) => cmd::teachers::run(&args, &ctx, &mut session, &mut prompter),
        Commands::Link(args) => cmd::link::run(&args, &ctx, &mut prompter),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
