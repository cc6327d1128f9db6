//! Async execution of controller effects on tokio.

pub mod driver;
pub mod loader;

pub use driver::RevealDriver;
pub use loader::{LoaderError, LocalFileLoader, PlaceholderLoader};
