use clap::Parser;
use orion::shell::{LaunchMode, ShellOptions};

/// Command-line flags.
///
/// clap's generated help is switched off: `--help` is an ordinary flag that
/// prints the one-line usage, and loses to `--verbose` when both are given.
/// Unknown arguments are ignored rather than rejected.
#[derive(Parser, Debug)]
#[command(name = "orion", disable_help_flag = true, ignore_errors = true)]
pub struct Cli {
    /// Trace every visited entry and every match
    #[arg(long)]
    pub verbose: bool,

    /// Print usage and exit
    #[arg(long)]
    pub help: bool,

    /// Walker threads; more than 1 walks in parallel (match order then varies)
    #[arg(long, env = "ORION_THREADS", default_value_t = 1)]
    pub threads: usize,

    /// Descend at most this many levels below the search scope
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Only match files with this extension
    #[arg(long)]
    pub extension: Option<String>,

    /// Case-insensitive name matching
    #[arg(long)]
    pub ignore_case: bool,

    /// Prompt again after each report until input is closed
    #[arg(long)]
    pub repeat: bool,
}

impl Cli {
    pub fn launch_mode(&self) -> LaunchMode {
        LaunchMode::resolve(self.verbose, self.help)
    }

    pub fn shell_options(&self) -> ShellOptions {
        ShellOptions {
            threads: self.threads,
            max_depth: self.max_depth,
            extension: self.extension.clone(),
            ignore_case: self.ignore_case,
            repeat: self.repeat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_wins_over_help() {
        let cli = Cli::parse_from(["orion", "--help", "--verbose"]);
        assert_eq!(cli.launch_mode(), LaunchMode::Verbose);
    }

    #[test]
    fn help_alone() {
        let cli = Cli::parse_from(["orion", "--help"]);
        assert_eq!(cli.launch_mode(), LaunchMode::Help);
    }

    #[test]
    fn search_options_pass_through() {
        let cli = Cli::parse_from(["orion", "--threads", "4", "--max-depth", "2", "--extension", "rs", "--repeat"]);
        let opts = cli.shell_options();
        assert_eq!(cli.launch_mode(), LaunchMode::Plain);
        assert_eq!(opts.threads, 4);
        assert_eq!(opts.max_depth, Some(2));
        assert_eq!(opts.extension.as_deref(), Some("rs"));
        assert!(opts.repeat);
        assert!(!opts.ignore_case);
    }

    #[test]
    fn version_flag_is_just_an_unknown_argument() {
        let cli = Cli::parse_from(["orion", "--version", "-V"]);
        assert_eq!(cli.launch_mode(), LaunchMode::Plain);
        assert_eq!(cli.shell_options().threads, 1);
    }
}
