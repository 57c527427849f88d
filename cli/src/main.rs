use std::io;
use std::path::PathBuf;

use clap::Parser;

mod command;
mod render;
mod session;
mod settings;

use session::{OutputFormat, Session};
use settings::Settings;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// TOML file with game and rule settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Board height
    #[arg(long, allow_negative_numbers = true)]
    rows: Option<i32>,

    /// Board width
    #[arg(long, allow_negative_numbers = true)]
    cols: Option<i32>,

    /// Number of hidden mines
    #[arg(short, long, allow_negative_numbers = true)]
    mines: Option<i32>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print events as JSON lines instead of a drawn board
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    settings.apply_args(&args);
    log::debug!("settings: {:?}", settings);

    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let mut session = Session::new(settings, format, io::stdout().lock());
    session.run(io::stdin().lock())?;

    log::debug!("Session ended");
    Ok(())
}
