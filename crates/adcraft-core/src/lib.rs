//! Domain layer for AdCraft.
//!
//! Holds the creative model, prompt construction, response normalization and
//! the traits that storage, generation and session backends implement. Nothing
//! in this crate performs I/O.

pub mod config;
pub mod creative;
pub mod error;
pub mod generation;
pub mod library;
pub mod normalizer;
pub mod prompt;
pub mod secret;
pub mod session;

pub use error::{AdcraftError, Result};
