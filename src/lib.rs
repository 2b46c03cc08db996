//! Header link management for Arduino toolchains.
//!
//! Exposes the headers in a repository's `include/` directory inside an
//! Arduino installation's avr-libc include directory as symbolic links, so
//! the toolchain finds them without copying.
//!
//! The public API is organised into layers:
//!
//! - **[`installation`]**, **[`platform`]**, **[`resolver`]** — validate the
//!   installation and compute the include destination
//! - **[`sources`]** — enumerate header files as source/destination pairs
//! - **[`resources`]** — inspect, apply, and remove a single header link
//! - **[`reconcile`]** — batch install/remove with skip and fail-fast policy
//! - **[`commands`]** — top-level orchestration used by the binary
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod installation;
pub mod logging;
pub mod platform;
pub mod reconcile;
pub mod resolver;
pub mod resources;
pub mod sources;
