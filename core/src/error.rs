//! Error types

use std::path::PathBuf;

use crate::renderer::RendererKind;

/// Graphics backend construction and presentation failures.
#[derive(Debug, thiserror::Error)]
pub enum GraphicsError {
    /// The resolved renderer was not compiled into this build
    #[error("renderer '{renderer}' is not available in this build")]
    Unavailable { renderer: RendererKind },
    /// Backend initialization failed
    #[error("graphics initialization failed: {0}")]
    Init(String),
    /// A frame could not be presented
    #[error("failed to present frame: {0}")]
    Present(String),
}

/// Config file failures. Never fatal, the caller logs and falls back.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Fatal errors from the run lifecycle.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Graphics(#[from] GraphicsError),
    /// Engine construction, setup, or a run step failed
    #[error("engine error: {0:#}")]
    Engine(anyhow::Error),
    /// Platform stub creation or initialization failed
    #[error("platform error: {0:#}")]
    Platform(anyhow::Error),
}
