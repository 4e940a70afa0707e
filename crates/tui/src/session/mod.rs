//! The interactive commands, one [`Component`](crate::runtime::Component)
//! each.

pub mod input;
pub mod progress;
pub mod search;
pub mod spin;
pub mod write;

pub use input::{InputOptions, InputSession};
pub use progress::{ProgressOptions, ProgressSession};
pub use search::{SearchOptions, SearchSession};
pub use spin::{Align, SpinOptions, SpinPhase, SpinSession, spinner, spinner_names};
pub use write::{WriteOptions, WriteSession};
