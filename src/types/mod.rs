//! Core type definitions for dfork

mod error;
mod item;
mod state;

pub use error::ForkError;
pub use item::{ItemKind, TreeItem};
pub use state::ProgressState;
