mod annotation;
mod progress;
mod record;
mod reviewer;
mod settings;
mod store;

pub use annotation::*;
pub use progress::*;
pub use record::*;
pub use reviewer::*;
pub use settings::*;
pub use store::*;
