use anyhow::Error as Anyhow;
use clap::Subcommand;
use derive_more::From;

mod graph;
mod review;

#[derive(From, Subcommand)]
pub enum Applet {
    Review(review::Review),
    Graph(graph::Graph),
}

impl Applet {
    pub fn execute(self) -> Result<(), Anyhow> {
        match self {
            Applet::Review(a) => Ok(a.execute()?),
            Applet::Graph(a) => Ok(a.execute()?),
        }
    }
}
