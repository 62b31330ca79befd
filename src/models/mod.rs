// Data Models
pub mod file_entry;
pub mod operation;
pub mod pane_model;

pub use file_entry::{FileEntry, FileType};
pub use pane_model::{PaneChange, PaneModel, SortDescriptor, SortKey};
