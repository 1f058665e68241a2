// Corpus layout is `<root>/<group>/<session>/*.xml`. A document belongs to the
// session named by its immediate parent directory. Like a shell glob, `*` never
// matches a name starting with a dot, so hidden directories and dotfiles are
// not part of the corpus.

use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use ignore::WalkBuilder;

use crate::error::{CurError, Result};

const DOCUMENT_GLOB: &str = "*/*/*.xml";
// Root, group, session, document.
const DOCUMENT_DEPTH: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Document {
    pub session: String,
    pub path: PathBuf,
}

fn document_matcher(root: &Path) -> Result<GlobMatcher> {
    let glob = GlobBuilder::new(DOCUMENT_GLOB)
        .literal_separator(true)
        .build()
        .map_err(|e| CurError::discovery(root, e))?;
    Ok(glob.compile_matcher())
}

fn session_of(path: &Path) -> Option<String> {
    let name = path.parent()?.file_name()?;
    Some(name.to_string_lossy().into_owned())
}

// Sorted by path so that runs over the same corpus are reproducible.
pub fn discover<P: AsRef<Path>>(root: P) -> Result<Vec<Document>> {
    let root = root.as_ref();
    let matcher = document_matcher(root)?;

    let mut builder = WalkBuilder::new(root);
    builder.max_depth(Some(DOCUMENT_DEPTH));
    builder.hidden(true);
    builder.follow_links(true);
    // The corpus is whatever is on disk; ignore files do not apply.
    builder.ignore(false);
    builder.git_ignore(false);
    builder.git_global(false);
    builder.git_exclude(false);
    builder.parents(false);
    builder.sort_by_file_path(|a, b| a.cmp(b));

    let mut documents = Vec::new();
    for entry in builder.build() {
        let entry = entry.map_err(|e| CurError::discovery(root, e))?;
        if entry.depth() != DOCUMENT_DEPTH || !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let path = entry.path();
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        if !matcher.is_match(relative) {
            continue;
        }
        if let Some(session) = session_of(path) {
            documents.push(Document {
                session,
                path: path.to_path_buf(),
            });
        }
    }
    documents.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(documents)
}
