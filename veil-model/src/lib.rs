//! Core data model definitions shared across veil crates.
#![allow(missing_docs)]

pub mod blur;
pub mod element;
pub mod error;
pub mod image;
pub mod observer;

pub use blur::BlurStrength;
pub use element::ElementHandle;
pub use error::{ModelError, Result as ModelResult};
pub use image::{ImageDescriptor, ImageFormat, SourceLocator};
pub use observer::ObserverConfiguration;
