pub mod editing;
pub mod io;
pub mod models;
pub mod project;
pub mod render;
pub mod session;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::{Cmd, EditError, Patch, RenderScope, Report};
pub use io::*;
pub use models::*;
pub use project::{ProjectError, ProjectFile};
pub use session::*;
