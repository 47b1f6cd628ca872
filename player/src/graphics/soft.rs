//! Software backend

use rawplay_core::system::{PAGE_HEIGHT, PAGE_WIDTH};
use rawplay_core::{Frame, Graphics, GraphicsError, Palette, RendererSelection, ScalerSpec, SystemStub};

use super::Pages;
use super::scaler::Scaler;

/// CPU renderer for the `original` and `software` renderers.
pub struct SoftGraphics {
    pages: Pages,
    scaler: Scaler,
    rgb565: bool,
    legacy: bool,
    initialized: bool,
}

impl SoftGraphics {
    pub fn new(selection: &RendererSelection) -> Self {
        Self {
            pages: Pages::new(),
            scaler: Scaler::None,
            rgb565: selection.use_16bit_packing,
            legacy: selection.legacy_1991,
            initialized: false,
        }
    }

    /// Expanded and scaled pixels of `page`, with their dimensions.
    pub fn render(&self, page: usize) -> (Vec<u32>, u32, u32) {
        let pixels = self.pages.to_xrgb(page, self.rgb565, self.legacy);
        let factor = self.scaler.factor();
        (
            self.scaler.apply(&pixels, PAGE_WIDTH, PAGE_HEIGHT),
            PAGE_WIDTH * factor,
            PAGE_HEIGHT * factor,
        )
    }
}

impl Graphics for SoftGraphics {
    fn init(&mut self) -> Result<(), GraphicsError> {
        self.pages = Pages::new();
        self.initialized = true;
        tracing::debug!(
            "Software graphics: {}x{}, rgb565: {}, 1991: {}",
            PAGE_WIDTH,
            PAGE_HEIGHT,
            self.rgb565,
            self.legacy
        );
        Ok(())
    }

    fn set_palette(&mut self, palette: &Palette) {
        self.pages.set_palette(palette);
    }

    fn set_scaler(&mut self, scaler: &ScalerSpec) {
        self.scaler = Scaler::from_spec(scaler);
    }

    fn fill_page(&mut self, page: usize, color: u8) {
        self.pages.fill(page, color);
    }

    fn fill_rect(&mut self, page: usize, x: u32, y: u32, width: u32, height: u32, color: u8) {
        self.pages.fill_rect(page, x, y, width, height, color);
    }

    fn copy_page(&mut self, src: usize, dst: usize) {
        self.pages.copy(src, dst);
    }

    fn present(&mut self, page: usize, stub: &mut dyn SystemStub) -> Result<(), GraphicsError> {
        if !self.initialized {
            return Err(GraphicsError::Present("software graphics not initialized".into()));
        }
        let (pixels, width, height) = self.render(page);
        stub.present(Frame {
            width,
            height,
            pixels: &pixels,
        })
        .map_err(|e| GraphicsError::Present(format!("{e:#}")))
    }

    fn fini(&mut self) {
        self.initialized = false;
    }
}
