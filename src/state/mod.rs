//! Application state module

mod effects;
mod entrance;
mod forms;
mod notifications;
mod submission;

pub use effects::*;
pub use entrance::*;
pub use forms::*;
pub use notifications::*;
pub use submission::*;
