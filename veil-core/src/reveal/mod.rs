//! Progressive reveal controller.

pub mod controller;
pub mod messages;
pub mod props;
pub mod state;

pub use controller::RevealController;
pub use messages::{RevealEffect, RevealMessage};
pub use props::{ReadyCallback, RevealProps};
pub use state::{LoadState, MountTicket, RevealState};
