//! Interactive front end: launch banner, the two prompts, search, report.
//!
//! Everything the process would otherwise read from globals (flags, stdin,
//! stdout) is handed in, so a whole session can be driven from a test.

use std::io::{BufRead, Write};

use crate::builder::SearchBuilder;
use crate::console::{Console, BANNER, USAGE};
use crate::error::OrionError;
use crate::report::report;

/// How the process was launched. Resolved first-match-wins: `--verbose`
/// beats `--help`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    Verbose,
    Help,
    Plain,
}

impl LaunchMode {
    pub fn resolve(verbose: bool, help: bool) -> Self {
        if verbose {
            Self::Verbose
        } else if help {
            Self::Help
        } else {
            Self::Plain
        }
    }
}

/// Search options that stay fixed for the lifetime of the shell.
#[derive(Debug, Clone)]
pub struct ShellOptions {
    pub threads: usize,
    pub max_depth: Option<usize>,
    pub extension: Option<String>,
    pub ignore_case: bool,
    /// Keep prompting after each report until input runs out.
    pub repeat: bool,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            threads: 1,
            max_depth: None,
            extension: None,
            ignore_case: false,
            repeat: false,
        }
    }
}

pub struct Shell {
    mode: LaunchMode,
    options: ShellOptions,
}

impl Shell {
    pub fn new(mode: LaunchMode, options: ShellOptions) -> Self {
        Self { mode, options }
    }

    /// Run the shell to completion.
    ///
    /// In [`LaunchMode::Help`] this prints the usage line and returns without
    /// reading input. The console passed in must have been created with
    /// verbosity matching the launch mode.
    pub fn run<R: BufRead, W: Write + Send>(&self, input: &mut R, console: &Console<W>) -> Result<(), OrionError> {
        match self.mode {
            LaunchMode::Help => return console.line(format_args!("{USAGE}")),
            LaunchMode::Verbose => {
                console.line(format_args!("{BANNER}"))?;
                console.line(format_args!("[Debug] Orion running in Verbose mode!"))?;
            }
            LaunchMode::Plain => console.line(format_args!("{BANNER}"))?,
        }
        console.line(format_args!("[Orion] Welcome to Orion, the file search engine."))?;

        loop {
            let Some(root_dir) = ask(input, console, "[Orion] Enter search scope: ")? else {
                if self.options.repeat {
                    log::debug!("input closed, leaving shell");
                    return Ok(());
                }
                // Single-shot mode searches even with nothing typed.
                return self.search_once(String::new(), String::new(), console);
            };
            let query = ask(input, console, "[Orion] Enter search query: ")?.unwrap_or_default();

            self.search_once(root_dir, query, console)?;
            if !self.options.repeat {
                return Ok(());
            }
        }
    }

    fn search_once<W: Write + Send>(&self, root_dir: String, query: String, console: &Console<W>) -> Result<(), OrionError> {
        log::info!("searching {root_dir:?} for {query:?}");

        let mut builder = SearchBuilder::default()
            .root(root_dir)
            .matching(query)
            .ignore_case(self.options.ignore_case)
            .threads(self.options.threads);
        if let Some(depth) = self.options.max_depth {
            builder = builder.max_depth(depth);
        }
        if let Some(ext) = &self.options.extension {
            builder = builder.extension(ext.clone());
        }

        let session = builder.run(console)?;
        report(&session, console)
    }
}

/// Prompt and read one trimmed line. `None` at end of input.
fn ask<R: BufRead, W: Write + Send>(
    input: &mut R,
    console: &Console<W>,
    prompt: &str,
) -> Result<Option<String>, OrionError> {
    console.prompt(prompt)?;
    let mut line = String::new();
    let read = input.read_line(&mut line).map_err(OrionError::Console)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}
