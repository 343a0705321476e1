mod clock;
mod timer;

pub use clock::*;
pub use timer::*;
