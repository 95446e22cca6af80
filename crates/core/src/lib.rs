#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Shared status model for the statusboard daemon and its clients.

pub mod badge;
pub mod model;
pub mod normalize;

pub use badge::*;
pub use model::*;
