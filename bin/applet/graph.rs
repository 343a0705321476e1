use anyhow::{Context, Error as Anyhow};
use clap::Parser;
use lib::sgf::Tree;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::instrument;

/// Charts Black's win rate along an annotated game.
#[derive(Debug, Parser)]
#[clap(disable_version_flag = true)]
pub struct Graph {
    /// A game annotated by the `review` applet.
    game: PathBuf,
}

impl Graph {
    const WIDTH: usize = 50;

    #[instrument(level = "trace", skip(self), err)]
    pub fn execute(self) -> Result<(), Anyhow> {
        let tree = Tree::load(&self.game)
            .with_context(|| format!("failed to load `{}`", self.game.display()))?;

        chart(&tree, &mut io::stdout().lock())?;
        Ok(())
    }
}

/// Writes one bar per node along the main line.
fn chart<W: Write>(tree: &Tree, out: &mut W) -> io::Result<()> {
    for (n, id) in tree.main_line().enumerate() {
        let winrate = tree
            .node(id)
            .value("SBKV")
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite());

        match winrate {
            None => writeln!(out, "{n:>4} {:<w$} {:>7}", "", "??", w = Graph::WIDTH)?,
            Some(v) => {
                let filled = (v.clamp(0., 100.) * Graph::WIDTH as f64 / 100.).round() as usize;
                let bar = "#".repeat(filled);
                writeln!(out, "{n:>4} {bar:.<w$} {v:>6.2}%", w = Graph::WIDTH)?;
            }
        }
    }

    Ok(())
}
