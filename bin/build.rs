use crate::io::Process;
use lib::{gtp::Gtp, review::Settings};
use std::{ffi::OsString, io};

/// Trait for types that build other types.
pub trait Build {
    /// The type to be built.
    type Output;

    /// The reason why [`Build::Output`] could not be built.
    type Error;

    /// Build an instance of [`Build::Output`].
    fn build(self) -> Result<Self::Output, Self::Error>;
}

/// The command line arguments Leela Zero is started with.
fn args(settings: &Settings) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["--gtp", "--noponder", "--resignpct", "0", "--threads", "1", "-w"]
        .into_iter()
        .map(Into::into)
        .collect();

    args.push(settings.network_dir.join(&settings.network).into());
    args
}

impl Build for &Settings {
    type Output = Gtp<Process>;
    type Error = io::Error;

    fn build(self) -> Result<Self::Output, Self::Error> {
        let process = Process::spawn(&self.engine, &args(self))?;
        Ok(Gtp::new(process))
    }
}
