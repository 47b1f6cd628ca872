//! Rawplay Core - configuration and run lifecycle
//!
//! Turns the command line into a [`Configuration`], resolves the renderer once
//! the content edition is known, and drives the engine, graphics backend, and
//! platform stub through one run.
//!
//! # Architecture
//!
//! - [`cli`] - Option parsing into a [`Configuration`]
//! - [`renderer`] - Renderer resolution from the content edition
//! - [`display`] - Display mode construction
//! - [`lifecycle`] - Acquire, run, and release of the collaborators
//! - [`system`] - Collaborator traits ([`Engine`], [`Graphics`], [`SystemStub`])

pub mod cli;
pub mod config;
pub mod content;
pub mod display;
pub mod error;
pub mod lifecycle;
pub mod renderer;
pub mod scaler;
pub mod scan;
pub mod system;

pub use cli::{ParseOutcome, USAGE, parse_args};
pub use config::{Configuration, Language};
pub use content::ContentEdition;
pub use display::{DisplayMode, PresentationMode, Viewport};
pub use error::{ConfigError, GraphicsError, LifecycleError};
pub use lifecycle::{RunReport, run};
pub use renderer::{RendererKind, RendererSelection, resolve};
pub use scaler::ScalerSpec;
pub use system::{Color, Engine, EngineSetup, Frame, Graphics, Palette, Platform, SystemStub};
