use crate::sgf::Tree;
use std::{ffi::OsString, io, path::Path, path::PathBuf};
use tracing::instrument;

/// Trait for places where annotated games are persisted.
#[cfg_attr(test, mockall::automock)]
pub trait Store {
    /// Persists the current state of the game.
    fn save(&mut self, tree: &Tree) -> io::Result<()>;
}

/// A [`Store`] that writes an SGF file.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SgfFile {
    path: PathBuf,
}

impl SgfFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SgfFile { path: path.into() }
    }

    /// The file that keeps the annotated copy of `input`, which sits right beside it.
    pub fn beside(input: &Path) -> Self {
        let mut path = OsString::from(input);
        path.push(".lza.sgf");
        SgfFile::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Store for SgfFile {
    #[instrument(level = "debug", skip(tree), err)]
    fn save(&mut self, tree: &Tree) -> io::Result<()> {
        tree.save(&self.path)
    }
}
