//! Tool definitions module.
//!
//! One file per tool. Each tool exposes its `NAME`, `DESCRIPTION`, an
//! `execute()` function holding the core logic, and an `entry()` that
//! registers it with the [`ToolRegistry`](super::ToolRegistry).

pub mod chat;
pub mod common;
pub mod generate;
pub mod health;
pub mod models;

pub use chat::ChatTool;
pub use generate::GenerateTool;
pub use health::HealthCheckTool;
pub use models::{DeleteModelTool, ListModelsTool, PullModelTool, ShowModelTool};
