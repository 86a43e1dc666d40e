//! orion: interactive recursive file-name search.

mod cli;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use orion::shell::Shell;
use orion::Console;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging()?;

    let mode = cli.launch_mode();
    let console = Console::stdout(cli.verbose);
    let shell = Shell::new(mode, cli.shell_options());

    shell
        .run(&mut io::stdin().lock(), &console)
        .context("orion session failed")
}

/// Diagnostics go to stderr so they never interleave with the `[Orion]`
/// stream on stdout. Level comes from `ORION_LOG`, default `warn`.
fn setup_logging() -> Result<()> {
    let level = match std::env::var("ORION_LOG") {
        Ok(v) => v
            .parse::<LevelFilter>()
            .ok()
            .with_context(|| format!("invalid ORION_LOG level {v:?}"))?,
        Err(_) => LevelFilter::Warn,
    };

    let config = ConfigBuilder::new().set_target_level(LevelFilter::Off).build();
    TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto)
        .context("failed to install logger")
}
