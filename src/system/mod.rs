// System Layer
pub mod filesystem;
pub mod opener;

pub use filesystem::FileSystem;
