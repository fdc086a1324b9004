use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

/// Reclaim - review and reclaim disk space interactively
#[derive(Parser, Debug)]
#[command(name = "reclaim")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, value_name = "PATH", env = "RECLAIM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to this file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// List the available cleaners and exit
    #[arg(long)]
    pub list: bool,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_defaults() {
        let cli = Cli::parse_from(["reclaim"]);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.list);
        assert!(cli.completions.is_none());
    }

    #[test]
    fn parse_verbosity_and_log_file() {
        let cli = Cli::parse_from(["reclaim", "-vv", "--log-file", "/tmp/r.log"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/r.log")));
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["reclaim", "-q", "-v"]).is_err());
    }

    #[test]
    fn parse_completions() {
        let cli = Cli::parse_from(["reclaim", "--completions", "bash"]);
        assert_eq!(cli.completions, Some(Shell::Bash));
    }
}
