pub mod workspace;

pub use workspace::{apply_saved_filter, NewCustomFilter, Workspace, WorkspaceStore};
