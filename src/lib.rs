//! Workspace facade: re-exports [`tilesets_core`] so the demos can be run
//! from the repository root with `cargo run --example <name>`.
pub use tilesets_core::*;
