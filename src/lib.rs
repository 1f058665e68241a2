extern crate csv;
extern crate globset;
extern crate ignore;
extern crate kdam;
extern crate quick_xml;
extern crate serde;
extern crate thiserror;
extern crate tracing;

pub mod config;
pub mod error;
pub mod lexicon;
pub mod report;
pub mod transcript;

use tracing::info;

pub use config::Config;
pub use error::{CurError, Result};
pub use lexicon::{Lexicon, Usage};
pub use report::{build_report, write_report, ReportLine, ReportMode};
pub use transcript::{scan, ChildCounters, SessionCounts};

// Lexicon, then every transcript, then the report. Nothing is returned unless
// all three stages succeed.
pub fn run(config: &Config) -> Result<Vec<ReportLine>> {
    let lexicon = Lexicon::load(&config.lexicon_path)?;
    let outcome = scan(config, &lexicon)?;
    let lines = build_report(&outcome.counts, config.mode)?;
    info!(
        n_documents = outcome.n_documents,
        n_skipped = outcome.skipped.len(),
        n_sessions = outcome.counts.len(),
        n_reported = lines.len(),
        "report ready"
    );
    Ok(lines)
}
