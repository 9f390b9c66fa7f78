//! Core types shared by the anchorgate workspace.
//!
//! - [`Error`] / [`Result`]: typed, recoverable I/O and encoding failures
//! - [`fs`]: durable atomic-replace writes and append-only JSON line logs
//! - [`ResultExt`]: small combinators for fire-and-forget side effects

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![forbid(clippy::panic)]

pub mod error;
pub mod fs;
pub mod result;

pub use error::Error;
pub use result::{Result, ResultExt};
