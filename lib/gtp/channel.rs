use crate::go::Color;
use crate::gtp::{is_analysis, Io};
use crate::util::{Clock, SystemClock, Timer};
use derive_more::{Display, Error, From};
use std::{io, time::Duration};
use tracing::{debug, instrument, warn};

/// The reason why the engine could not be talked to.
#[derive(Debug, Display, Error, From)]
#[display(fmt = "the GTP engine stopped responding")]
pub struct GtpError(#[from(forward)] io::Error);

/// Whether the engine accepted a command.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Status {
    #[display(fmt = "=")]
    Success,
    #[display(fmt = "?")]
    Failure,
}

/// The engine's reply to a command.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Response {
    pub status: Status,
    /// The lines of the reply, starting with the tagged one.
    pub text: String,
}

impl Response {
    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    /// The text of the reply without its status and id.
    pub fn body(&self) -> &str {
        let text = self.text.trim_start();
        let text = text.strip_prefix(['=', '?']).unwrap_or(text);
        text.trim_start_matches(|c: char| c.is_ascii_digit()).trim()
    }
}

/// How a line received from the engine is routed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Line {
    /// The first line of the reply to command `id`.
    Tagged { id: u64, status: Status },
    /// The end of a reply.
    Blank,
    /// Anything else, including continuation lines and unsolicited messages.
    Other,
}

impl Line {
    fn classify(line: &str) -> Self {
        let line = line.trim();

        if line.is_empty() {
            return Line::Blank;
        }

        let (status, rest) = if let Some(rest) = line.strip_prefix('=') {
            (Status::Success, rest)
        } else if let Some(rest) = line.strip_prefix('?') {
            (Status::Failure, rest)
        } else {
            return Line::Other;
        };

        let digits = rest.split(char::is_whitespace).next().unwrap_or_default();
        match digits.parse() {
            Ok(id) => Line::Tagged { id, status },
            Err(_) => Line::Other,
        }
    }
}

/// A Go Text Protocol client.
///
/// Every command is tagged with a fresh id, so that replies can be told apart from
/// output that belongs to earlier commands.
#[derive(Debug)]
pub struct Gtp<T: Io, C: Clock = SystemClock> {
    io: T,
    clock: C,
    sent: u64,
    seen: Option<u64>,
}

impl<T: Io> Gtp<T> {
    /// Constructs [`Gtp`] over the given transport.
    pub fn new(io: T) -> Self {
        Gtp::with_clock(io, SystemClock)
    }
}

impl<T: Io, C: Clock> Gtp<T, C> {
    /// Constructs [`Gtp`] over the given transport, measuring time with `clock`.
    pub fn with_clock(io: T, clock: C) -> Self {
        Gtp {
            io,
            clock,
            sent: 0,
            seen: None,
        }
    }

    /// The clock this client measures time with.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn send(&mut self, cmd: &str) -> Result<u64, GtpError> {
        self.sent += 1;
        let id = self.sent;
        self.io.send(&format!("{id} {cmd}"))?;
        self.io.flush()?;
        Ok(id)
    }

    fn recv(&mut self) -> Result<(String, Line), GtpError> {
        let line = loop {
            match self.io.recv() {
                Ok(line) => break line,
                Err(e) if e.kind() == io::ErrorKind::InvalidData => debug!(%e, "ignored"),
                Err(e) => return Err(e.into()),
            }
        };

        let kind = Line::classify(&line);

        if let Line::Tagged { id, .. } = kind {
            self.seen = Some(id);
        }

        Ok((line, kind))
    }

    /// Sends a command and waits for its reply.
    ///
    /// Lines that belong to replies to other commands are discarded.
    #[instrument(level = "debug", skip(self), ret, err)]
    pub fn request(&mut self, cmd: &str) -> Result<Response, GtpError> {
        let id = self.send(cmd)?;
        let mut status = Status::Success;
        let mut lines = Vec::new();

        loop {
            let (line, kind) = self.recv()?;

            if self.seen != Some(id) {
                debug!(%line, "ignored");
                continue;
            }

            match kind {
                Line::Blank => break,
                Line::Tagged { status: s, .. } => status = s,
                Line::Other => {}
            }

            lines.push(line.trim().to_string());
        }

        Ok(Response {
            status,
            text: lines.join("\n"),
        })
    }

    /// Asks the engine to analyze the position for `color` and returns the last report
    /// received before `duration` elapses.
    ///
    /// Reports are requested every `interval` centiseconds.
    #[instrument(level = "debug", skip(self), err)]
    pub fn analyze(
        &mut self,
        color: Color,
        interval: u32,
        duration: Duration,
    ) -> Result<Option<String>, GtpError> {
        let id = self.send(&format!("lz-analyze {color} interval {interval}"))?;
        let timer = Timer::start(self.clock.now(), duration);
        let mut latest = None;

        while timer.elapsed(self.clock.now()).is_ok() {
            let (line, kind) = self.recv()?;

            if self.seen != Some(id) {
                continue;
            }

            if let Line::Tagged { status: Status::Failure, .. } = kind {
                warn!(%line, "analysis rejected");
                break;
            }

            if is_analysis(&line) {
                latest = Some(line);
            }
        }

        // The engine keeps reporting until it receives another command,
        // whatever is still in flight is drained under the stale id.
        self.request("name")?;

        Ok(latest.map(|l| l.trim().to_string()))
    }
}
