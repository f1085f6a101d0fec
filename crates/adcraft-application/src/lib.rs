//! Application layer for AdCraft.
//!
//! Coordinates the domain traits from `adcraft-core` into the library
//! workflow: load a user's creatives, generate new ones, and follow
//! sign-in changes.

pub mod error;
pub mod library_controller;
pub mod notice;

pub use error::LibraryError;
pub use library_controller::{GenerationOutcome, LibraryController};
pub use notice::{LibraryNotice, NoticeCallback};
