use crate::build::Build;
use anyhow::{Context, Error as Anyhow};
use clap::Parser;
use lib::review::{Reviewer, SgfFile, Settings};
use lib::sgf::Tree;
use std::{env, fs, path::PathBuf};
use tracing::{info, instrument};

/// Annotates a game with Leela Zero's evaluation of every move.
#[derive(Debug, Parser)]
#[clap(disable_version_flag = true)]
pub struct Review {
    /// The configuration file, defaults to `config.ron` beside the executable.
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// The game to annotate in SGF.
    ///
    /// The annotated game is written beside it with the `.lza.sgf` suffix.
    game: PathBuf,
}

impl Review {
    fn config(&self) -> Result<PathBuf, Anyhow> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => {
                let exe = env::current_exe().context("failed to locate the executable")?;
                Ok(exe.with_file_name("config.ron"))
            }
        }
    }

    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let config = self.config()?;
        let settings: Settings = fs::read_to_string(&config)
            .with_context(|| format!("failed to read `{}`", config.display()))?
            .parse()
            .with_context(|| format!("invalid configuration in `{}`", config.display()))?;

        let mut tree = Tree::load(&self.game)
            .with_context(|| format!("failed to load `{}`", self.game.display()))?;

        info!(engine = %settings.engine.display(), "starting Leela Zero");
        let gtp = (&settings).build().context("failed to start Leela Zero")?;

        let mut store = SgfFile::beside(&self.game);
        Reviewer::new(gtp, settings).review(&mut tree, &mut store)?;

        info!(path = %store.path().display(), "done");

        Ok(())
    }
}
