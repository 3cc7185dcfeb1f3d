use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "fillgap",
    about = "Fill the gaps in a translated JSON document from its source",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Merge one source file into one target file
    Merge(MergeArgs),
    /// Merge every configured document from the source into the target directory
    Run(RunArgs),
}

/// Flags shared by every command that writes.
#[derive(Args, Clone, Debug, Default)]
pub struct WriteArgs {
    /// Report what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,
    /// Overwrite targets without taking a timestamped backup first
    #[arg(long)]
    pub no_backup: bool,
}

#[derive(Args)]
pub struct MergeArgs {
    /// Complete document to copy missing values from
    pub source: PathBuf,
    /// Partially translated document to fill in
    pub target: PathBuf,
    #[command(flatten)]
    pub write: WriteArgs,
}

#[derive(Args)]
pub struct RunArgs {
    /// Documents to process, relative to the source directory
    pub files: Vec<String>,
    /// Config file (defaults to ./fillgap.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub source_dir: Option<PathBuf>,
    #[arg(long)]
    pub target_dir: Option<PathBuf>,
    #[command(flatten)]
    pub write: WriteArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_merge() {
        let cli = Cli::try_parse_from(["fillgap", "merge", "en/a.json", "no/a.json"]).unwrap();
        if let Command::Merge(args) = cli.command {
            assert_eq!(args.source, PathBuf::from("en/a.json"));
            assert_eq!(args.target, PathBuf::from("no/a.json"));
            assert!(!args.write.dry_run);
            assert!(!args.write.no_backup);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_merge_requires_both_paths() {
        assert!(Cli::try_parse_from(["fillgap", "merge", "en/a.json"]).is_err());
    }

    #[test]
    fn parse_merge_dry_run() {
        let cli = Cli::try_parse_from(["fillgap", "merge", "--dry-run", "a.json", "b.json"]).unwrap();
        if let Command::Merge(args) = cli.command {
            assert!(args.write.dry_run);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_run_defaults() {
        let cli = Cli::try_parse_from(["fillgap", "run"]).unwrap();
        if let Command::Run(args) = cli.command {
            assert!(args.files.is_empty());
            assert!(args.config.is_none());
            assert!(args.source_dir.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_run_with_files_and_dirs() {
        let cli = Cli::try_parse_from([
            "fillgap", "run", "warmups.json", "legs.json",
            "--source-dir", "json2", "--target-dir", "json2_no", "--no-backup",
        ]).unwrap();
        if let Command::Run(args) = cli.command {
            assert_eq!(args.files, vec!["warmups.json", "legs.json"]);
            assert_eq!(args.source_dir, Some(PathBuf::from("json2")));
            assert_eq!(args.target_dir, Some(PathBuf::from("json2_no")));
            assert!(args.write.no_backup);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_run_config() {
        let cli = Cli::try_parse_from(["fillgap", "run", "-c", "conf/fillgap.toml"]).unwrap();
        if let Command::Run(args) = cli.command {
            assert_eq!(args.config, Some(PathBuf::from("conf/fillgap.toml")));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["fillgap", "--verbose", "run"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["fillgap", "run", "--format", "json"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }
}
