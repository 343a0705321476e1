mod analysis;
mod channel;
mod io;

#[cfg(test)]
pub(crate) mod stub;

pub use analysis::*;
pub use channel::*;
pub use io::*;
