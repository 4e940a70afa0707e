//! Terminal-independent building blocks for `chew`: the fuzzy matcher used by
//! `search` and the subprocess supervisor used by `spin`.

mod error;
pub mod matcher;
pub mod task;

pub use error::TaskError;
pub use matcher::{CandidateSet, Match, Matcher, Ranking, Score};
pub use task::{CapturedOutput, OutputMode, TaskEvent, TaskHandle, TaskSpec, TaskStatus};
