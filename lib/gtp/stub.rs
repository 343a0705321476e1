use crate::gtp::Io;
use crate::util::ManualClock;
use std::collections::VecDeque;
use std::io::{self, ErrorKind};
use std::{cell::RefCell, rc::Rc, time::Duration};

/// An [`Io`] that replays canned lines, regardless of what is sent to it.
#[derive(Debug)]
pub struct Script {
    lines: VecDeque<String>,
    tick: Option<(Rc<ManualClock>, Duration)>,
}

impl Script {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Script {
            lines: lines.into_iter().map(Into::into).collect(),
            tick: None,
        }
    }

    /// Advances `clock` by `d` before every line is received.
    pub fn tick(mut self, clock: Rc<ManualClock>, d: Duration) -> Self {
        self.tick = Some((clock, d));
        self
    }
}

impl Io for Script {
    fn recv(&mut self) -> io::Result<String> {
        if let Some((clock, d)) = &self.tick {
            clock.advance(*d);
        }

        self.lines.pop_front().ok_or_else(|| ErrorKind::UnexpectedEof.into())
    }

    fn send(&mut self, _: &str) -> io::Result<()> {
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// An [`Io`] that behaves like Leela Zero.
///
/// While analyzing, a report is produced every time the previous one has been received,
/// each taking one tick of the shared clock.
#[derive(Debug)]
pub struct StubEngine {
    clock: Rc<ManualClock>,
    tick: Duration,
    winrate: u32,
    pv: Vec<String>,
    log: Rc<RefCell<Vec<String>>>,
    pending: VecDeque<String>,
    reports: Option<u64>,
}

impl StubEngine {
    pub fn new(clock: Rc<ManualClock>) -> Self {
        StubEngine {
            clock,
            tick: Duration::from_millis(500),
            winrate: 5000,
            pv: vec!["Q16".into(), "D4".into()],
            log: Rc::default(),
            pending: VecDeque::new(),
            reports: None,
        }
    }

    /// How long each report takes.
    pub fn tick(mut self, d: Duration) -> Self {
        self.tick = d;
        self
    }

    /// The win rate reported for the side to move, in hundredths of a percent.
    pub fn winrate(mut self, w: u32) -> Self {
        self.winrate = w;
        self
    }

    /// The principal variation reported, the first move is the preferred one.
    pub fn prefers<I: IntoIterator<Item = &'static str>>(mut self, pv: I) -> Self {
        self.pv = pv.into_iter().map(String::from).collect();
        self
    }

    /// The commands received so far, without their ids.
    pub fn log(&self) -> Rc<RefCell<Vec<String>>> {
        self.log.clone()
    }

    fn report(&self, visits: u64) -> String {
        let best = self.pv.first().map_or("pass", String::as_str);
        let w = self.winrate;

        format!(
            "info move {best} visits {visits} winrate {w} prior 1500 lcb {w} order 0 pv {} \
             info move pass visits 1 winrate 0 prior 0 lcb 0 order 1 pv pass",
            self.pv.join(" ")
        )
    }
}

impl Io for StubEngine {
    fn recv(&mut self) -> io::Result<String> {
        if let Some(line) = self.pending.pop_front() {
            return Ok(line);
        }

        match &mut self.reports {
            None => Err(ErrorKind::UnexpectedEof.into()),
            Some(n) => {
                *n += 1;
                let visits = *n;
                self.clock.advance(self.tick);
                Ok(self.report(visits))
            }
        }
    }

    fn send(&mut self, msg: &str) -> io::Result<()> {
        let (id, cmd) = msg.split_once(' ').unwrap_or(("", msg));
        self.log.borrow_mut().push(cmd.to_string());

        // Any command interrupts an ongoing analysis.
        if self.reports.take().is_some() {
            self.pending.push_back(String::new());
        }

        match cmd.split_whitespace().next() {
            Some("lz-analyze") => {
                self.pending.push_back(format!("={id}"));
                self.reports = Some(0);
                return Ok(());
            }

            Some("name") => self.pending.push_back(format!("={id} Leela Zero")),
            Some("version") => self.pending.push_back(format!("={id} 0.17")),
            Some("play" | "quit") => self.pending.push_back(format!("={id}")),
            _ => self.pending.push_back(format!("?{id} unknown command")),
        }

        self.pending.push_back(String::new());
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
