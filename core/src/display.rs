//! Display mode construction
//!
//! The presentation mode and window geometry come straight from configuration.
//! The GL-context flag is only final once the renderer has been resolved, see
//! [`DisplayMode::finalized`].

use crate::renderer::{RendererKind, RendererSelection};
use crate::scan::leading_int;

/// Default windowed width in pixels.
pub const DEFAULT_WINDOW_WIDTH: u32 = 640;
/// Default windowed height in pixels.
pub const DEFAULT_WINDOW_HEIGHT: u32 = 400;

/// How the output is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresentationMode {
    /// Window of the configured size
    #[default]
    Windowed,
    /// Fullscreen, stretched to fill the screen
    Fullscreen,
    /// Fullscreen with the 4:3 aspect ratio preserved (letterboxed)
    FullscreenAspectRatio,
}

impl PresentationMode {
    pub fn is_fullscreen(self) -> bool {
        !matches!(self, Self::Windowed)
    }
}

/// Aspect ratio kept by [`PresentationMode::FullscreenAspectRatio`].
pub const ASPECT_RATIO: (u32, u32) = (4, 3);

/// Destination rectangle of the game image on a surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Display-mode descriptor handed to the platform stub.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayMode {
    pub mode: PresentationMode,
    pub width: u32,
    pub height: u32,
    /// Whether the platform should leave the window surface to a GPU backend
    pub gl_context_requested: bool,
}

impl Default for DisplayMode {
    fn default() -> Self {
        Self {
            mode: PresentationMode::Windowed,
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
            gl_context_requested: false,
        }
    }
}

impl DisplayMode {
    /// Apply a `<width>x<height>` value, `%dx%d` style.
    ///
    /// Fields are updated as far as the scan gets: `"800"` changes only the
    /// width, `"abc"` changes nothing. A negative value stops the scan at
    /// that field.
    pub fn apply_window(&mut self, value: &str) {
        let Some((width, rest)) = leading_int(value) else {
            tracing::warn!("Malformed window size '{}', keeping {}x{}", value, self.width, self.height);
            return;
        };
        let Ok(width) = u32::try_from(width) else {
            tracing::warn!("Invalid window width in '{}'", value);
            return;
        };
        self.width = width;

        let height = rest
            .strip_prefix('x')
            .and_then(leading_int)
            .and_then(|(height, _)| u32::try_from(height).ok());
        match height {
            Some(height) => self.height = height,
            None => tracing::warn!("No window height in '{}', keeping {}", value, self.height),
        }
    }

    /// Overwrite the presentation mode (last flag wins).
    pub fn set_presentation(&mut self, mode: PresentationMode) {
        self.mode = mode;
    }

    /// Keep the GL flag in step with an explicit renderer choice.
    pub fn track_renderer(&mut self, kind: RendererKind) {
        self.gl_context_requested = kind == RendererKind::Gl;
    }

    /// Where the image goes on a `surface_width`x`surface_height` surface.
    ///
    /// The aspect-corrected mode centres the largest 4:3 rectangle that fits;
    /// every other mode fills the surface.
    pub fn viewport(&self, surface_width: u32, surface_height: u32) -> Viewport {
        if self.mode != PresentationMode::FullscreenAspectRatio {
            return Viewport {
                x: 0,
                y: 0,
                width: surface_width,
                height: surface_height,
            };
        }

        let (aw, ah) = ASPECT_RATIO;
        let wider = u64::from(surface_width) * u64::from(ah) > u64::from(surface_height) * u64::from(aw);
        let (width, height) = if wider {
            (surface_height * aw / ah, surface_height)
        } else {
            (surface_width, surface_width * ah / aw)
        };
        Viewport {
            x: (surface_width - width) / 2,
            y: (surface_height - height) / 2,
            width,
            height,
        }
    }

    /// Final display mode for a resolved renderer.
    ///
    /// Must run after renderer resolution; before that the GL flag may be stale.
    pub fn finalized(mut self, selection: &RendererSelection) -> Self {
        self.track_renderer(selection.kind);
        self
    }
}
