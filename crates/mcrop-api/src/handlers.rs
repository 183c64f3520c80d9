//! Request handlers.

pub mod download;
pub mod health;
pub mod preview;
pub mod process;

pub use download::*;
pub use health::*;
pub use preview::*;
pub use process::*;
