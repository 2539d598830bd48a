//! Task model and the ordered task list

pub mod list;
pub mod model;

pub use list::TaskList;
pub use model::{Schedule, Task, TaskKind};
