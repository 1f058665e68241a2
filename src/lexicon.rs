// Irregular verb lexicon: which surface forms count as correct usage and which
// as over-regularization.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{CurError, Result};

const REQUIRED_COLUMNS: [&str; 3] = ["VBD", "VBN", "OR"];

// One row of the lexicon file. Columns other than these three are ignored.
#[derive(Debug, Deserialize)]
pub struct IrregularVerbEntry {
    #[serde(rename = "VBD")]
    pub past: String,
    #[serde(rename = "VBN")]
    pub participle: String,
    #[serde(rename = "OR")]
    pub overregularized: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Usage {
    Correct,
    Overregularized,
}

// Both sets hold lowercased forms; lookups must fold the same way.
#[derive(Debug, Default)]
pub struct Lexicon {
    correct: HashSet<String>,
    overregularized: HashSet<String>,
}

// Trim, then Unicode lowercase. This is per-character lowercasing, not full case
// folding: "STRASSE" folds to "strasse" and does not meet "straße".
pub fn fold(form: &str) -> String {
    form.trim().to_lowercase()
}

impl Lexicon {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .from_path(path)
            .map_err(|e| CurError::lexicon(path, e))?;

        let headers = reader.headers().map_err(|e| CurError::lexicon(path, e))?;
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|column| !headers.iter().any(|h| h == *column))
            .collect();
        if !missing.is_empty() {
            return Err(CurError::lexicon(
                path,
                format!("missing column(s) {}", missing.join(", ")),
            ));
        }

        let mut lexicon = Lexicon::default();
        for row in reader.deserialize::<IrregularVerbEntry>() {
            let entry = row.map_err(|e| CurError::lexicon(path, e))?;
            lexicon.add(&entry);
        }
        lexicon.warn_ambiguous();
        debug!(
            path = %path.display(),
            correct = lexicon.correct.len(),
            overregularized = lexicon.overregularized.len(),
            "loaded lexicon"
        );
        Ok(lexicon)
    }

    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a IrregularVerbEntry>,
    {
        let mut lexicon = Lexicon::default();
        for entry in entries {
            lexicon.add(entry);
        }
        lexicon
    }

    fn add(&mut self, entry: &IrregularVerbEntry) {
        for form in [&entry.past, &entry.participle] {
            let form = fold(form);
            if !form.is_empty() {
                self.correct.insert(form);
            }
        }
        let form = fold(&entry.overregularized);
        if !form.is_empty() {
            self.overregularized.insert(form);
        }
    }

    fn warn_ambiguous(&self) {
        for form in self.correct.intersection(&self.overregularized) {
            warn!(form = %form, "form is listed as both correct and over-regularized; counting it as correct");
        }
    }

    // Correct usage wins when a form is somehow in both sets.
    pub fn classify(&self, token: &str) -> Option<Usage> {
        let token = fold(token);
        if self.correct.contains(&token) {
            Some(Usage::Correct)
        } else if self.overregularized.contains(&token) {
            Some(Usage::Overregularized)
        } else {
            None
        }
    }

    pub fn correct_forms(&self) -> &HashSet<String> {
        &self.correct
    }

    pub fn overregularized_forms(&self) -> &HashSet<String> {
        &self.overregularized
    }
}
