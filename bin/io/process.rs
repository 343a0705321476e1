use anyhow::{bail, Context, Error as Anyhow};
use lib::gtp::{Io, Pipe};
use lib::util::Timer;
use std::ffi::OsString;
use std::time::{Duration, Instant};
use std::{io, path::Path, thread};
use tracing::{error, field::display, instrument, Span};

/// Trait for child processes that can be waited on.
#[cfg_attr(test, mockall::automock)]
trait Reap {
    /// The exit status of the process, if it has exited.
    fn status(&mut self) -> io::Result<Option<String>>;

    /// Forcibly terminates the process and waits for it to exit.
    fn kill(&mut self) -> io::Result<()>;
}

impl Reap for std::process::Child {
    fn status(&mut self) -> io::Result<Option<String>> {
        Ok(self.try_wait()?.map(|s| s.to_string()))
    }

    fn kill(&mut self) -> io::Result<()> {
        std::process::Child::kill(self)?;
        self.wait().map(drop)
    }
}

/// An [`Io`] interface for the engine's process.
#[derive(Debug)]
pub struct Process {
    #[cfg(test)]
    pipe: Pipe<io::Sink, io::Empty>,

    #[cfg(not(test))]
    pipe: Pipe<std::process::ChildStdin, std::process::ChildStdout>,

    #[cfg(test)]
    child: MockReap,

    #[cfg(not(test))]
    child: std::process::Child,
}

impl Process {
    #[cfg(test)]
    const TIMEOUT: Duration = Duration::ZERO;

    #[cfg(not(test))]
    const TIMEOUT: Duration = Duration::from_millis(1000);

    const POLL: Duration = Duration::from_millis(10);

    /// Spawns the engine.
    #[instrument(level = "trace", err)]
    pub fn spawn(program: &Path, args: &[OsString]) -> io::Result<Self> {
        #[cfg(test)]
        {
            Ok(Process {
                pipe: (io::sink(), io::empty()).into(),
                child: MockReap::new(),
            })
        }

        #[cfg(not(test))]
        {
            use std::process::{Command, Stdio};

            let mut child = Command::new(program)
                .args(args)
                .stdin(Stdio::piped())
                .stdout(Stdio::piped())
                .stderr(Stdio::null())
                .spawn()?;

            let pipe = Option::zip(child.stdin.take(), child.stdout.take()).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::Other,
                    Anyhow::msg("failed to open the engine's stdio"),
                )
            })?;

            Ok(Process {
                pipe: pipe.into(),
                child,
            })
        }
    }

    fn terminate(&mut self) -> Result<String, Anyhow> {
        self.pipe.send("quit")?;
        self.pipe.flush()?;

        let timer = Timer::start(Instant::now(), Self::TIMEOUT);

        loop {
            if let Some(status) = self.child.status()? {
                return Ok(status);
            }

            if timer.elapsed(Instant::now()).is_err() {
                self.child.kill()?;
                bail!(
                    "timed out after {}ms waiting for the engine to exit",
                    Self::TIMEOUT.as_millis()
                );
            }

            thread::sleep(Self::POLL);
        }
    }
}

/// Asks the engine to quit and waits for it to exit.
impl Drop for Process {
    #[instrument(level = "trace", skip(self), fields(status))]
    fn drop(&mut self) {
        match self.terminate().context("failed to gracefully terminate the engine") {
            Err(e) => error!("{:?}", e),
            Ok(s) => {
                Span::current().record("status", display(s));
            }
        }
    }
}

impl Io for Process {
    fn recv(&mut self) -> io::Result<String> {
        self.pipe.recv()
    }

    fn send(&mut self, msg: &str) -> io::Result<()> {
        self.pipe.send(msg)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.pipe.flush()
    }
}
