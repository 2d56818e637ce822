//! Model management tools: listing and the administrative operations.

pub mod delete;
pub mod list;
pub mod pull;
pub mod show;

pub use delete::DeleteModelTool;
pub use list::ListModelsTool;
pub use pull::PullModelTool;
pub use show::ShowModelTool;
