use tracing::info;

/// Reports how far along a review is.
#[derive(Debug)]
pub struct Progress {
    total: usize,
    last: Option<usize>,
}

impl Progress {
    pub fn new(total: usize) -> Self {
        Progress { total, last: None }
    }

    /// The percentage of `done` units out of the total.
    pub fn percent(&self, done: usize) -> usize {
        match self.total {
            0 => 100,
            t => done.min(t) * 100 / t,
        }
    }

    /// Logs the progress if the percentage changed since the last update.
    pub fn update(&mut self, done: usize) {
        let percent = self.percent(done);
        if self.last != Some(percent) {
            self.last = Some(percent);
            info!(progress = %format_args!("{percent}%"));
        }
    }

    /// Logs completion.
    pub fn finish(&mut self) {
        self.last = Some(100);
        info!(progress = "100%");
    }

    /// The last percentage logged.
    pub fn last(&self) -> Option<usize> {
        self.last
    }
}
