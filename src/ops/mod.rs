//! High-level operations.
//!
//! This module contains the implementation of pbxgen commands.

pub mod discover;
pub mod generate;

pub use discover::{discover, DiscoverOptions};
pub use generate::{generate, render, write_manifest, GenerateOptions, GenerateResult, OutputMode, Rendered};
