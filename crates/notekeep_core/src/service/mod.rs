//! Host-facing use-case layer.
//!
//! # Responsibility
//! - Compose the stores into one owner the host constructs at startup.
//! - Keep hosts decoupled from store wiring and persistence details.

pub mod notebook;
