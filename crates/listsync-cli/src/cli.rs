use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "listsync",
    about = "Ordered list reconciliation: minimal edit scripts between two lists",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with a `key` and a `[diff]` table
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Diff two JSON arrays and print the edit script
    Diff(DiffArgs),
    /// Replay the bundled artist list sample
    Demo(DemoArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    /// JSON array holding the old list
    pub old: PathBuf,
    /// JSON array holding the new list
    pub new: PathBuf,
    /// Object field identifying an item across versions
    #[arg(short, long)]
    pub key: Option<String>,
    #[arg(short = 'm', long)]
    pub detect_moves: bool,
}

#[derive(Args)]
pub struct DemoArgs {
    #[arg(short = 'm', long)]
    pub detect_moves: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_args_parse() {
        let cli = Cli::parse_from([
            "listsync", "diff", "a.json", "b.json", "--key", "id", "-m", "--format", "json",
        ]);
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Command::Diff(args) => {
                assert_eq!(args.old, PathBuf::from("a.json"));
                assert_eq!(args.key.as_deref(), Some("id"));
                assert!(args.detect_moves);
            }
            Command::Demo(_) => panic!("expected diff"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["listsync", "demo", "-v", "--config", "ls.toml"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("ls.toml")));
        assert!(matches!(cli.command, Command::Demo(DemoArgs { detect_moves: false })));
    }
}
