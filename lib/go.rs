mod color;
mod point;

pub use color::*;
pub use point::*;
