//! Card operations and their dispatcher

pub mod builtin;
mod error;
mod executor;
mod traits;

pub use error::ToolError;
pub use executor::ToolExecutor;
pub use traits::CardTool;
