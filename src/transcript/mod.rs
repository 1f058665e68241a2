// Walks the corpus, pulls out the child's words and tallies them per session.

use std::collections::BTreeMap;
use std::path::PathBuf;

use kdam::{tqdm, Bar, BarExt};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::lexicon::{Lexicon, Usage};

pub mod child_words;
pub mod discover;

pub use self::child_words::ChildWords;
pub use self::discover::{discover, Document};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChildCounters {
    pub cu_count: u64,
    pub or_count: u64,
}

impl ChildCounters {
    pub fn record(&mut self, usage: Usage) {
        match usage {
            Usage::Correct => self.cu_count += 1,
            Usage::Overregularized => self.or_count += 1,
        }
    }

    pub fn merge(&mut self, other: ChildCounters) {
        self.cu_count += other.cu_count;
        self.or_count += other.or_count;
    }

    pub fn total(&self) -> u64 {
        self.cu_count + self.or_count
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    // Percentage of correct usages, or None when nothing was counted.
    pub fn correct_usage_rate(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some((100 * self.cu_count) as f64 / self.total() as f64)
    }
}

// Keyed by session id. A session is present only once one of its tokens counted.
pub type SessionCounts = BTreeMap<String, ChildCounters>;

#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub counts: SessionCounts,
    pub n_documents: usize,
    pub skipped: Vec<PathBuf>,
}

pub fn count_words<I>(lexicon: &Lexicon, words: I) -> Result<ChildCounters>
where
    I: IntoIterator<Item = Result<String>>,
{
    let mut counters = ChildCounters::default();
    for word in words {
        if let Some(usage) = lexicon.classify(&word?) {
            counters.record(usage);
        }
    }
    Ok(counters)
}

pub fn count_document(lexicon: &Lexicon, document: &Document, speaker: &str) -> Result<ChildCounters> {
    count_words(lexicon, ChildWords::open(&document.path, speaker)?)
}

// None when progress is off, so nothing is drawn at all.
fn progress_bar(config: &Config, total: usize) -> Option<Bar> {
    if config.progress {
        Some(tqdm!(total = total, desc = "transcripts"))
    } else {
        None
    }
}

pub fn scan(config: &Config, lexicon: &Lexicon) -> Result<ScanOutcome> {
    let documents = discover(&config.data_dir)?;
    info!(
        root = %config.data_dir.display(),
        n_documents = documents.len(),
        "scanning transcripts"
    );

    let mut outcome = ScanOutcome {
        n_documents: documents.len(),
        ..ScanOutcome::default()
    };
    let mut pbar = progress_bar(config, documents.len());
    for document in documents.iter() {
        if let Some(pbar) = pbar.as_mut() {
            let _ = pbar.update(1);
        }
        let counters = match count_document(lexicon, document, &config.speaker) {
            Ok(counters) => counters,
            Err(e) if config.skip_malformed => {
                warn!(error = %e, "skipping transcript");
                outcome.skipped.push(document.path.clone());
                continue;
            }
            Err(e) => return Err(e),
        };
        debug!(
            path = %document.path.display(),
            session = %document.session,
            cu = counters.cu_count,
            or = counters.or_count,
            "counted transcript"
        );
        if !counters.is_empty() {
            outcome
                .counts
                .entry(document.session.clone())
                .or_default()
                .merge(counters);
        }
    }
    if pbar.is_some() {
        eprintln!();
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CurError;
    use crate::lexicon::IrregularVerbEntry;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn go_lexicon() -> Lexicon {
        Lexicon::from_entries(&[IrregularVerbEntry {
            past: "went".to_string(),
            participle: "gone".to_string(),
            overregularized: "goed".to_string(),
        }])
    }

    fn utterance(words: &[&str]) -> String {
        let words: String = words.iter().map(|w| format!("<w>{}</w>", w)).collect();
        format!("<CHAT><u who=\"CHI\">{}</u><u who=\"MOT\"><w>went</w></u></CHAT>", words)
    }

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn quiet(root: &Path) -> Config {
        Config {
            progress: false,
            ..Config::with_data_dir(root)
        }
    }

    #[test]
    fn test_counters() {
        let mut counters = ChildCounters::default();
        assert_eq!(counters.correct_usage_rate(), None);
        counters.record(Usage::Correct);
        counters.record(Usage::Overregularized);
        counters.record(Usage::Overregularized);
        assert_eq!(counters, ChildCounters { cu_count: 1, or_count: 2 });
        assert_eq!(counters.correct_usage_rate(), Some(100. / 3.));
        counters.merge(ChildCounters { cu_count: 1, or_count: 0 });
        assert_eq!(counters.correct_usage_rate(), Some(50.));
    }

    #[test]
    fn test_progress_bar_only_when_enabled() {
        let tmp_dir = tempdir().unwrap();
        let config = quiet(tmp_dir.path());
        assert!(progress_bar(&config, 3).is_none());
        let config = Config {
            progress: true,
            ..config
        };
        assert!(progress_bar(&config, 3).is_some());
    }

    #[test]
    fn test_count_words() {
        let lexicon = go_lexicon();
        let words = ["WENT", "goed", "dog", "Gone"].map(|w| Ok(w.to_string()));
        let counters = count_words(&lexicon, words).unwrap();
        assert_eq!(counters, ChildCounters { cu_count: 2, or_count: 1 });
    }

    #[test]
    fn test_scan_groups_by_session() {
        let tmp_dir = tempdir().unwrap();
        let root = tmp_dir.path();
        write(root, "g1/childA/1.xml", &utterance(&["went", "goed"]));
        write(root, "g1/childA/2.xml", &utterance(&["goed"]));
        write(root, "g2/childB/1.xml", &utterance(&["gone", "cat"]));
        write(root, "g2/childD/1.xml", &utterance(&["cat"]));

        let outcome = scan(&quiet(root), &go_lexicon()).unwrap();
        assert_eq!(outcome.n_documents, 4);
        assert_eq!(outcome.counts["childA"], ChildCounters { cu_count: 1, or_count: 2 });
        assert_eq!(outcome.counts["childB"], ChildCounters { cu_count: 1, or_count: 0 });
        assert!(!outcome.counts.contains_key("childD"));
    }

    #[test]
    fn test_scan_aborts_on_malformed() {
        let tmp_dir = tempdir().unwrap();
        let root = tmp_dir.path();
        write(root, "g1/childA/1.xml", &utterance(&["went"]));
        write(root, "g1/childA/2.xml", "<CHAT><u who=\"CHI\">");
        let err = scan(&quiet(root), &go_lexicon()).unwrap_err();
        assert!(matches!(err, CurError::DocumentParse { .. }));
    }

    #[test]
    fn test_scan_skips_malformed() {
        let tmp_dir = tempdir().unwrap();
        let root = tmp_dir.path();
        write(root, "g1/childA/1.xml", &utterance(&["went"]));
        write(root, "g1/childA/2.xml", "<CHAT><u who=\"CHI\"><w>goed</w>");
        let config = Config {
            skip_malformed: true,
            ..quiet(root)
        };
        let outcome = scan(&config, &go_lexicon()).unwrap();
        assert_eq!(outcome.skipped, vec![root.join("g1/childA/2.xml")]);
        assert_eq!(outcome.counts["childA"], ChildCounters { cu_count: 1, or_count: 0 });
    }
}
