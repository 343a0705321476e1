use std::io::{self, BufRead, BufReader, ErrorKind, Lines, Read, Write};
use tracing::instrument;

/// Trait for line-oriented transports.
#[cfg_attr(test, mockall::automock)]
pub trait Io {
    /// Receive a line.
    ///
    /// Fails with [`ErrorKind::UnexpectedEof`] once the other end hangs up.
    fn recv(&mut self) -> io::Result<String>;

    /// Send a line.
    fn send(&mut self, msg: &str) -> io::Result<()>;

    /// Flush the internal buffers.
    fn flush(&mut self) -> io::Result<()>;
}

/// An [`Io`] interface over a pair of byte streams.
#[derive(Debug)]
pub struct Pipe<W: Write, R: Read> {
    writer: W,
    reader: Lines<BufReader<R>>,
}

impl<W: Write, R: Read> Pipe<W, R> {
    pub fn new(writer: W, reader: R) -> Self {
        Pipe {
            writer,
            reader: BufReader::new(reader).lines(),
        }
    }
}

impl<W: Write, R: Read> From<(W, R)> for Pipe<W, R> {
    fn from((writer, reader): (W, R)) -> Self {
        Pipe::new(writer, reader)
    }
}

impl<W: Write, R: Read> Io for Pipe<W, R> {
    #[instrument(level = "trace", skip(self), ret, err)]
    fn recv(&mut self) -> io::Result<String> {
        self.reader.next().ok_or(ErrorKind::UnexpectedEof)?
    }

    #[instrument(level = "trace", skip(self), err)]
    fn send(&mut self, msg: &str) -> io::Result<()> {
        writeln!(&mut self.writer, "{}", msg)
    }

    #[instrument(level = "trace", skip(self), err)]
    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{collections::VecDeque, io::empty, str};
    use test_strategy::proptest;

    #[proptest]
    fn recv_waits_for_line_break(#[strategy("[^\r\n]*")] s: String) {
        let mut buf = VecDeque::new();
        writeln!(&mut buf, "{}", s)?;
        let mut pipe = Pipe::new(io::sink(), &mut buf);
        assert_eq!(pipe.recv()?, s);
    }

    #[test]
    fn recv_fails_once_stream_ends() {
        let mut pipe = Pipe::new(io::sink(), empty());
        assert_eq!(pipe.recv().map_err(|e| e.kind()), Err(ErrorKind::UnexpectedEof));
    }

    #[proptest]
    fn send_appends_line_break(s: String) {
        let mut buf = Vec::new();
        let mut pipe = Pipe::new(&mut buf, empty());
        pipe.send(&s)?;
        pipe.flush()?;
        drop(pipe);
        assert_eq!(str::from_utf8(&buf)?, format!("{s}\n"));
    }
}
