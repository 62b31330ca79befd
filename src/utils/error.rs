use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RafError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {}", path.display())]
    PathNotFound { path: PathBuf },

    #[error("Not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("Already exists: {}", path.display())]
    FileExists { path: PathBuf },

    #[error("Source and destination are the same: {}", path.display())]
    SameSourceAndDest { path: PathBuf },

    #[error("Cannot place '{}' inside itself ({})", src.display(), dest.display())]
    RecursiveOperation { src: PathBuf, dest: PathBuf },

    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Copy failed: {} -> {}: {reason}", src.display(), dest.display())]
    CopyFailed {
        src: PathBuf,
        dest: PathBuf,
        reason: String,
    },

    #[error("Move failed: {} -> {}: {reason}", src.display(), dest.display())]
    MoveFailed {
        src: PathBuf,
        dest: PathBuf,
        reason: String,
    },

    #[error("Delete failed: {}: {reason}", path.display())]
    DeleteFailed { path: PathBuf, reason: String },

    #[error("Rename failed: {} -> {}: {reason}", src.display(), dest.display())]
    RenameFailed {
        src: PathBuf,
        dest: PathBuf,
        reason: String,
    },

    #[error("Cannot open {}: {reason}", path.display())]
    ExternalOpenFailed { path: PathBuf, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, RafError>;
