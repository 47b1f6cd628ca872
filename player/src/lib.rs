//! Rawplay - Another World player
//!
//! Desktop implementations of the collaborators driven by
//! [`rawplay_core::lifecycle`].

pub mod engine;
pub mod graphics;
pub mod platform;
pub mod stub;

pub use platform::DesktopPlatform;
