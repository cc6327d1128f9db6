//! Shared configuration library for veil.
//!
//! Centralizes reveal defaults (blur strength, trigger-once policy, observer
//! options) and the presentation class tokens, plus loading them from files
//! and environment overrides so every host reads the same source of truth.

pub mod models;
pub mod util;

pub use models::classes::ClassNames;
pub use models::{RevealConfig, RevealConfigSource};
