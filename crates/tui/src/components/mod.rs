//! UI building blocks shared by the sessions.

/// Character limits for text editors.
pub mod limit;
/// Prompt row with an editable input and a right-aligned status.
pub mod prompt;
/// Highlighted, width-limited list rows.
pub mod rows;
/// Scrolling window over a list.
pub mod viewport;

pub use limit::CharLimit;
pub use prompt::{PromptContext, render_prompt};
pub use rows::highlight_line;
pub use viewport::ListViewport;
