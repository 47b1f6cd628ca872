//! Collaborator boundaries
//!
//! The lifecycle drives three independently implemented subsystems:
//!
//! - [`Engine`] - content loading and interpretation, one step per call
//! - [`Graphics`] - turns engine drawing into pixels for one renderer
//! - [`SystemStub`] - window, input polling, and presentation
//!
//! A [`Platform`] constructs all three, which keeps the lifecycle testable
//! with recording doubles.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use winit::window::Window;

use crate::config::Language;
use crate::content::ContentEdition;
use crate::display::DisplayMode;
use crate::error::GraphicsError;
use crate::renderer::RendererSelection;
use crate::scaler::ScalerSpec;

/// Width of an engine page in pixels.
pub const PAGE_WIDTH: u32 = 320;
/// Height of an engine page in pixels.
pub const PAGE_HEIGHT: u32 = 200;
/// Number of drawing pages.
pub const PAGE_COUNT: usize = 4;

/// 24-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `0x00RRGGBB`
    pub fn to_xrgb(self) -> u32 {
        (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }
}

/// 16-colour palette.
pub type Palette = [Color; 16];

/// CPU frame ready for presentation, `0x00RRGGBB` pixels in row order.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub width: u32,
    pub height: u32,
    pub pixels: &'a [u32],
}

/// Everything the engine needs after backends are bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSetup {
    pub language: Language,
    pub renderer: RendererSelection,
    pub scaler: ScalerSpec,
}

/// Window, input, and presentation.
pub trait SystemStub {
    /// Open the window with `title` in `mode`.
    fn init(&mut self, title: &str, mode: &DisplayMode) -> Result<()>;

    /// Drain pending window and input events.
    fn process_events(&mut self);

    /// Whether the user asked to quit. Polled once per loop iteration.
    fn quit_requested(&self) -> bool;

    /// Display mode the stub was initialized with.
    fn display_mode(&self) -> DisplayMode;

    /// Native window, once initialized. GPU backends render into it directly.
    fn window(&self) -> Option<Arc<Window>>;

    /// Present a CPU frame.
    fn present(&mut self, frame: Frame<'_>) -> Result<()>;

    fn sleep(&mut self, duration: Duration);

    /// Close the window and release platform resources.
    fn fini(&mut self);
}

/// Renderer backend operating on indexed 320x200 pages.
pub trait Graphics {
    /// Allocate pages and any device resources.
    fn init(&mut self) -> Result<(), GraphicsError>;

    fn set_palette(&mut self, palette: &Palette);

    fn set_scaler(&mut self, scaler: &ScalerSpec);

    /// Fill a whole page with one colour index.
    fn fill_page(&mut self, page: usize, color: u8);

    /// Fill a rectangle, clipped to the page.
    fn fill_rect(&mut self, page: usize, x: u32, y: u32, width: u32, height: u32, color: u8);

    fn copy_page(&mut self, src: usize, dst: usize);

    /// Display `page` through `stub`.
    fn present(&mut self, page: usize, stub: &mut dyn SystemStub) -> Result<(), GraphicsError>;

    /// Release device resources. Called once before the backend is dropped.
    fn fini(&mut self) {}
}

/// Content engine.
pub trait Engine {
    /// Edition detected while the engine was constructed.
    fn content_edition(&self) -> ContentEdition;

    /// Localized window title.
    fn game_title(&self, language: Language) -> &'static str;

    /// Take over the graphics backend for the run.
    fn attach(&mut self, graphics: Box<dyn Graphics>);

    fn setup(&mut self, setup: &EngineSetup) -> Result<()>;

    /// Execute one step. Pacing is up to the engine.
    fn run(&mut self, stub: &mut dyn SystemStub) -> Result<()>;

    /// Stop, returning the attached backend to the caller for release.
    fn finish(&mut self) -> Option<Box<dyn Graphics>>;
}

/// Factory for the collaborators of one run.
pub trait Platform {
    type Engine: Engine;
    type Stub: SystemStub;

    /// Construct the engine; detects the content edition as a side effect.
    fn create_engine(&self, data_dir: &Path, part: i32) -> Result<Self::Engine>;

    /// Construct the backend for a resolved selection.
    fn create_graphics(&self, selection: &RendererSelection) -> Result<Box<dyn Graphics>, GraphicsError>;

    fn create_stub(&self) -> Result<Self::Stub>;
}
