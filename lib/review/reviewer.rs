use crate::go::{Color, Point};
use crate::gtp::{Analysis, Gtp, GtpError, Io};
use crate::review::{annotate, Progress, Record, Settings, Store};
use crate::sgf::Tree;
use crate::util::{Clock, SystemClock, Timer};
use derive_more::{Display, Error, From};
use std::io;
use tracing::{info, instrument, warn};

/// The reason why a review was interrupted.
#[derive(Debug, Display, Error, From)]
pub enum ReviewError {
    #[display(fmt = "lost contact with the engine")]
    Engine(GtpError),
    #[display(fmt = "failed to save the annotated game")]
    Store(io::Error),
}

/// Replays games through Leela Zero and annotates them with its evaluation.
#[derive(Debug)]
pub struct Reviewer<T: Io, C: Clock = SystemClock> {
    gtp: Gtp<T, C>,
    settings: Settings,
}

impl<T: Io, C: Clock> Reviewer<T, C> {
    pub fn new(gtp: Gtp<T, C>, settings: Settings) -> Self {
        Reviewer { gtp, settings }
    }

    /// Annotates every move along the main line of `tree`.
    ///
    /// The engine is expected to start from an empty board. Progress is saved to `store`
    /// periodically and once more when the review is complete.
    #[instrument(level = "debug", skip(self, tree, store), err)]
    pub fn review<S: Store>(&mut self, tree: &mut Tree, store: &mut S) -> Result<(), ReviewError> {
        let name = self.gtp.request("name")?;
        info!(engine = %name.body(), "ready");

        let size = tree.board_size();
        let records = Record::collect(tree);
        let mut progress = Progress::new(records.len());
        progress.update(0);

        let mut checkpoint = Timer::start(self.gtp.clock().now(), self.settings.checkpoint);
        let mut previous: Option<Record> = None;

        for (n, mut current) in records.into_iter().enumerate() {
            for (color, point) in tree.node(current.node).setup(size) {
                self.play(color, Some(point), size)?;
            }

            if let Some(turn) = current.turn {
                current.assess(self.analyze(turn, size)?);
            }

            if let Some(p) = &mut previous {
                p.after = current.before;
            }

            if let Some(turn) = current.turn {
                self.play(turn, tree.node(current.node).point(size), size)?;
            }

            if let Some(p) = previous.as_ref().filter(|p| p.delta().is_some()) {
                annotate(tree, p, size, self.settings.hotspot_threshold);
            }

            previous = Some(current);

            let now = self.gtp.clock().now();
            if checkpoint.elapsed(now).is_err() {
                info!("checkpoint");
                store.save(tree)?;
                checkpoint = Timer::start(now, self.settings.checkpoint);
            }

            progress.update(n);
        }

        if let Some(mut last) = previous {
            // Nothing follows the last move, so the position after it is analyzed directly.
            if let Some(turn) = last.turn {
                last.after = self.analyze(!turn, size)?.winrate;
            }

            annotate(tree, &last, size, self.settings.hotspot_threshold);
        }

        store.save(tree)?;
        progress.finish();

        Ok(())
    }

    /// Analyzes the position with `turn` to move.
    fn analyze(&mut self, turn: Color, size: u8) -> Result<Analysis, GtpError> {
        let (interval, duration) = (self.settings.interval, self.settings.analysis);
        let analysis = match self.gtp.analyze(turn, interval, duration)? {
            Some(line) => Analysis::parse(&line, turn, size),
            None => Analysis::default(),
        };

        Ok(analysis)
    }

    /// Plays a stone, or passes if there's no point.
    fn play(&mut self, color: Color, point: Option<Point>, size: u8) -> Result<(), GtpError> {
        let vertex = point.map_or_else(|| "pass".into(), |p| p.to_vertex(size));
        let response = self.gtp.request(&format!("play {color} {vertex}"))?;

        if !response.is_success() {
            warn!(%color, %vertex, reason = %response.body(), "move rejected");
        }

        Ok(())
    }
}
