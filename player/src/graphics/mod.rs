//! Graphics backends
//!
//! Both backends draw into the same indexed [`Pages`]; they differ in how a
//! page reaches the screen. The software backend expands and scales on the
//! CPU and hands a frame to the platform stub. The GPU backend (`gl` feature)
//! uploads the page as a texture and draws straight into the window.

#[cfg(feature = "gl")]
pub mod gpu;
pub mod scaler;
pub mod soft;

use rawplay_core::system::{PAGE_COUNT, PAGE_HEIGHT, PAGE_WIDTH};
use rawplay_core::{Color, Graphics, GraphicsError, Palette, RendererKind, RendererSelection};

pub use soft::SoftGraphics;

/// Create the backend for a resolved selection.
///
/// `original` and `software` share the software backend; `gl` needs the `gl`
/// feature and is reported as unavailable without it.
pub fn create(selection: &RendererSelection) -> Result<Box<dyn Graphics>, GraphicsError> {
    match selection.kind {
        RendererKind::Original | RendererKind::Software => {
            tracing::info!("Using software graphics");
            Ok(Box::new(SoftGraphics::new(selection)))
        }
        RendererKind::Gl => create_gl(selection),
    }
}

#[cfg(feature = "gl")]
fn create_gl(selection: &RendererSelection) -> Result<Box<dyn Graphics>, GraphicsError> {
    tracing::info!("Using GPU graphics");
    Ok(Box::new(gpu::GpuGraphics::new(selection)))
}

#[cfg(not(feature = "gl"))]
fn create_gl(selection: &RendererSelection) -> Result<Box<dyn Graphics>, GraphicsError> {
    Err(GraphicsError::Unavailable {
        renderer: selection.kind,
    })
}

/// Indexed drawing pages plus the active palette.
pub struct Pages {
    pages: Vec<Vec<u8>>,
    palette: Palette,
}

impl Default for Pages {
    fn default() -> Self {
        Self::new()
    }
}

impl Pages {
    pub fn new() -> Self {
        Self {
            pages: vec![vec![0; (PAGE_WIDTH * PAGE_HEIGHT) as usize]; PAGE_COUNT],
            palette: [Color::default(); 16],
        }
    }

    pub fn set_palette(&mut self, palette: &Palette) {
        self.palette = *palette;
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    fn page_mut(&mut self, page: usize) -> Option<&mut Vec<u8>> {
        let found = self.pages.get_mut(page);
        if found.is_none() {
            tracing::warn!("Invalid page {}", page);
        }
        found
    }

    pub fn page(&self, page: usize) -> Option<&[u8]> {
        self.pages.get(page).map(Vec::as_slice)
    }

    pub fn fill(&mut self, page: usize, color: u8) {
        if let Some(pixels) = self.page_mut(page) {
            pixels.fill(color & 0x0F);
        }
    }

    pub fn fill_rect(&mut self, page: usize, x: u32, y: u32, width: u32, height: u32, color: u8) {
        let x_end = x.saturating_add(width).min(PAGE_WIDTH);
        let y_end = y.saturating_add(height).min(PAGE_HEIGHT);
        if x >= x_end || y >= y_end {
            return;
        }
        let Some(pixels) = self.page_mut(page) else {
            return;
        };
        for row in y..y_end {
            let start = (row * PAGE_WIDTH + x) as usize;
            let end = (row * PAGE_WIDTH + x_end) as usize;
            pixels[start..end].fill(color & 0x0F);
        }
    }

    pub fn copy(&mut self, src: usize, dst: usize) {
        if src == dst || src >= self.pages.len() || dst >= self.pages.len() {
            return;
        }
        let source = self.pages[src].clone();
        self.pages[dst].copy_from_slice(&source);
    }

    /// Expand `page` to `0x00RRGGBB` through the palette.
    ///
    /// `rgb565` rounds each colour through 16-bit packing first; `legacy`
    /// limits components to the 6-bit VGA DAC range.
    pub fn to_xrgb(&self, page: usize, rgb565: bool, legacy: bool) -> Vec<u32> {
        let lut: [u32; 16] = std::array::from_fn(|i| {
            let mut color = self.palette[i];
            if legacy {
                color = vga_dac(color);
            }
            if rgb565 {
                color = unpack_565(pack_565(color));
            }
            color.to_xrgb()
        });
        self.page(page)
            .map(|pixels| pixels.iter().map(|&index| lut[usize::from(index & 0x0F)]).collect())
            .unwrap_or_default()
    }
}

/// Pack to RGB565.
pub fn pack_565(color: Color) -> u16 {
    (u16::from(color.r >> 3) << 11) | (u16::from(color.g >> 2) << 5) | u16::from(color.b >> 3)
}

/// Expand RGB565, replicating high bits into the low ones.
pub fn unpack_565(packed: u16) -> Color {
    let r = ((packed >> 11) & 0x1F) as u8;
    let g = ((packed >> 5) & 0x3F) as u8;
    let b = (packed & 0x1F) as u8;
    Color::new((r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2))
}

/// Truncate to 6 bits per channel, as the VGA DAC did.
fn vga_dac(color: Color) -> Color {
    Color::new(color.r & 0xFC, color.g & 0xFC, color.b & 0xFC)
}
