// Fixed locations and policies for a run. The defaults are the ones the report
// has always been produced with; the CLI only overrides them.

use std::path::PathBuf;

use crate::report::ReportMode;

pub const DATA_DIR: &str = "data";
pub const LEXICON_PATH: &str = "data/irregulars.tsv";
pub const CHILD_SPEAKER: &str = "CHI";

#[derive(Clone, Debug)]
pub struct Config {
    pub data_dir: PathBuf,
    pub lexicon_path: PathBuf,
    pub speaker: String,
    pub mode: ReportMode,
    pub skip_malformed: bool,
    pub progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DATA_DIR),
            lexicon_path: PathBuf::from(LEXICON_PATH),
            speaker: CHILD_SPEAKER.to_string(),
            mode: ReportMode::CorrectUsageDriven,
            skip_malformed: false,
            progress: true,
        }
    }
}

impl Config {
    // Config rooted at `data_dir`, with the lexicon in its usual place inside it.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let lexicon_path = data_dir.join("irregulars.tsv");
        Self {
            data_dir,
            lexicon_path,
            ..Self::default()
        }
    }
}
