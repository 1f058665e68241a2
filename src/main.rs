// Prints the correct-usage rate of irregular past-tense verbs for every child
// session in a transcript corpus.

extern crate anyhow;
extern crate clap;
extern crate cur_report;
extern crate tracing_subscriber;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cur_report::config::{CHILD_SPEAKER, DATA_DIR, LEXICON_PATH};
use cur_report::{run, write_report, Config, ReportMode};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    // Corpus root; transcripts live at <data-dir>/<group>/<session>/*.xml.
    #[arg(long, default_value = DATA_DIR)]
    data_dir: PathBuf,
    // Tab-separated lexicon with VBD, VBN and OR columns.
    #[arg(long, default_value = LEXICON_PATH)]
    lexicon: PathBuf,
    // Speaker code of the child in utterance `who` attributes.
    #[arg(long, default_value = CHILD_SPEAKER)]
    speaker: String,

    // Also report sessions that have over-regularizations but no correct usages.
    #[arg(long, default_value_t = false)]
    include_or_only: bool,
    // Skip transcripts that fail to parse instead of aborting the run.
    #[arg(long, default_value_t = false)]
    skip_malformed: bool,
    #[arg(long, short = 'q', default_value_t = false)]
    quiet: bool,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config {
            data_dir: args.data_dir,
            lexicon_path: args.lexicon,
            speaker: args.speaker,
            mode: if args.include_or_only {
                ReportMode::AllSessions
            } else {
                ReportMode::CorrectUsageDriven
            },
            skip_malformed: args.skip_malformed,
            progress: !args.quiet,
        }
    }
}

// Diagnostics go to stderr so that stdout only carries report lines.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let config = Config::from(Args::parse());

    let lines = run(&config).with_context(|| {
        format!(
            "could not compute report for corpus {}",
            config.data_dir.display()
        )
    })?;
    let stdout = io::stdout();
    write_report(&lines, &mut stdout.lock()).context("could not write report")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn config(args: &[&str]) -> Config {
        let argv = std::iter::once("cur-report").chain(args.iter().copied());
        Config::from(Args::try_parse_from(argv).unwrap())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);
        assert_eq!(config.data_dir, Path::new(DATA_DIR));
        assert_eq!(config.lexicon_path, Path::new(LEXICON_PATH));
        assert_eq!(config.speaker, CHILD_SPEAKER);
        assert_eq!(config.mode, ReportMode::CorrectUsageDriven);
        assert!(!config.skip_malformed);
        assert!(config.progress);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            "--data-dir",
            "corpus",
            "--lexicon",
            "corpus/verbs.tsv",
            "--speaker",
            "TAR",
            "--include-or-only",
            "--skip-malformed",
            "-q",
        ]);
        assert_eq!(config.data_dir, Path::new("corpus"));
        assert_eq!(config.lexicon_path, Path::new("corpus/verbs.tsv"));
        assert_eq!(config.speaker, "TAR");
        assert_eq!(config.mode, ReportMode::AllSessions);
        assert!(config.skip_malformed);
        assert!(!config.progress);
    }

    #[test]
    fn test_rejects_positional() {
        assert!(Args::try_parse_from(["cur-report", "data"]).is_err());
    }
}
