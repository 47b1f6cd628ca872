//! winit platform stub
//!
//! The event loop is pumped rather than run, so the lifecycle can poll the
//! quit flag between engine steps. Window close or Escape requests quit.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use rawplay_core::{DisplayMode, Frame, SystemStub, Viewport};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Fullscreen, Window, WindowId};

/// Pumps allowed for the window to appear during init.
const INIT_PUMPS: u32 = 100;
const INIT_PUMP_TIMEOUT: Duration = Duration::from_millis(10);

type SoftSurface = softbuffer::Surface<Arc<Window>, Arc<Window>>;

pub struct WinitStub {
    event_loop: Option<EventLoop<()>>,
    state: StubState,
}

#[derive(Default)]
struct StubState {
    title: String,
    mode: DisplayMode,
    window: Option<Arc<Window>>,
    context: Option<softbuffer::Context<Arc<Window>>>,
    surface: Option<SoftSurface>,
    quit: bool,
    error: Option<anyhow::Error>,
}

impl WinitStub {
    pub fn new() -> Result<Self> {
        let event_loop = EventLoop::new().map_err(|e| anyhow!("failed to create event loop: {e}"))?;
        Ok(Self {
            event_loop: Some(event_loop),
            state: StubState::default(),
        })
    }

    /// Pump pending events; returns false once the loop has exited.
    fn pump(&mut self, timeout: Duration) -> bool {
        let Some(event_loop) = self.event_loop.as_mut() else {
            return false;
        };
        match event_loop.pump_app_events(Some(timeout), &mut self.state) {
            PumpStatus::Continue => true,
            PumpStatus::Exit(code) => {
                tracing::debug!("Event loop exited with code {}", code);
                self.state.quit = true;
                false
            }
        }
    }
}

impl StubState {
    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let fullscreen = self
            .mode
            .mode
            .is_fullscreen()
            .then_some(Fullscreen::Borderless(None));
        let attributes = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(self.mode.width.max(1), self.mode.height.max(1)))
            .with_fullscreen(fullscreen);

        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .map_err(|e| anyhow!("failed to create window: {e}"))?,
        );

        if !self.mode.gl_context_requested {
            let context = softbuffer::Context::new(window.clone())
                .map_err(|e| anyhow!("failed to create softbuffer context: {e}"))?;
            let surface = softbuffer::Surface::new(&context, window.clone())
                .map_err(|e| anyhow!("failed to create softbuffer surface: {e}"))?;
            self.context = Some(context);
            self.surface = Some(surface);
        }

        tracing::info!(
            "Window created: '{}' {}x{} {:?}",
            self.title,
            self.mode.width,
            self.mode.height,
            self.mode.mode
        );
        self.window = Some(window);
        Ok(())
    }
}

impl ApplicationHandler for StubState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.create_window(event_loop) {
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested");
                self.quit = true;
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                tracing::info!("Escape pressed, quitting");
                self.quit = true;
            }
            _ => {}
        }
    }
}

impl SystemStub for WinitStub {
    fn init(&mut self, title: &str, mode: &DisplayMode) -> Result<()> {
        self.state.title = title.to_string();
        self.state.mode = *mode;

        for _ in 0..INIT_PUMPS {
            let running = self.pump(INIT_PUMP_TIMEOUT);
            if let Some(e) = self.state.error.take() {
                return Err(e);
            }
            if self.state.window.is_some() {
                return Ok(());
            }
            if !running {
                bail!("event loop exited before the window was created");
            }
        }
        bail!("window was not created")
    }

    fn process_events(&mut self) {
        self.pump(Duration::ZERO);
    }

    fn quit_requested(&self) -> bool {
        self.state.quit
    }

    fn display_mode(&self) -> DisplayMode {
        self.state.mode
    }

    fn window(&self) -> Option<Arc<Window>> {
        self.state.window.clone()
    }

    fn present(&mut self, frame: Frame<'_>) -> Result<()> {
        let Some(surface) = self.state.surface.as_mut() else {
            // GPU backends present on their own
            return Ok(());
        };
        let window = self.state.window.as_ref().context("present before init")?;

        let size = window.inner_size();
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
            return Ok(());
        };
        surface
            .resize(width, height)
            .map_err(|e| anyhow!("failed to resize surface: {e}"))?;

        let mut buffer = surface
            .buffer_mut()
            .map_err(|e| anyhow!("failed to map surface buffer: {e}"))?;
        let viewport = self.state.mode.viewport(size.width, size.height);
        blit(frame, &mut buffer, size.width, viewport);

        window.pre_present_notify();
        buffer
            .present()
            .map_err(|e| anyhow!("failed to present surface: {e}"))
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }

    fn fini(&mut self) {
        self.state.surface = None;
        self.state.context = None;
        if self.state.window.take().is_some() {
            tracing::info!("Window closed");
        }
        self.event_loop = None;
    }
}

/// Nearest-neighbour copy of `frame` into `viewport` of a `dst_width`-wide
/// buffer; everything outside the viewport is cleared to black.
pub fn blit(frame: Frame<'_>, dst: &mut [u32], dst_width: u32, viewport: Viewport) {
    dst.fill(0);
    if frame.width == 0 || frame.height == 0 || viewport.width == 0 || viewport.height == 0 {
        return;
    }
    let stride = dst_width as usize;
    for vy in 0..viewport.height {
        let sy = (u64::from(vy) * u64::from(frame.height) / u64::from(viewport.height)) as usize;
        let src_row = &frame.pixels[sy * frame.width as usize..][..frame.width as usize];
        let row_start = (viewport.y + vy) as usize * stride + viewport.x as usize;
        let Some(dst_row) = dst.get_mut(row_start..row_start + viewport.width as usize) else {
            return;
        };
        for (vx, pixel) in dst_row.iter_mut().enumerate() {
            let sx = (vx as u64 * u64::from(frame.width) / u64::from(viewport.width)) as usize;
            *pixel = src_row[sx];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blit_stretch_doubles() {
        let src = [1, 2, 3, 4];
        let frame = Frame {
            width: 2,
            height: 2,
            pixels: &src,
        };
        let mut dst = vec![9; 16];
        let viewport = Viewport { x: 0, y: 0, width: 4, height: 4 };
        blit(frame, &mut dst, 4, viewport);
        assert_eq!(dst, vec![1, 1, 2, 2, 1, 1, 2, 2, 3, 3, 4, 4, 3, 3, 4, 4]);
    }

    #[test]
    fn test_blit_letterbox_clears_borders() {
        let src = [5; 4];
        let frame = Frame {
            width: 2,
            height: 2,
            pixels: &src,
        };
        let mut dst = vec![9; 4 * 2];
        let viewport = Viewport { x: 1, y: 0, width: 2, height: 2 };
        blit(frame, &mut dst, 4, viewport);
        assert_eq!(dst, vec![0, 5, 5, 0, 0, 5, 5, 0]);
    }

    #[test]
    fn test_blit_empty_frame() {
        let frame = Frame {
            width: 0,
            height: 0,
            pixels: &[],
        };
        let mut dst = vec![9; 4];
        blit(frame, &mut dst, 2, Viewport { x: 0, y: 0, width: 2, height: 2 });
        assert_eq!(dst, vec![0; 4]);
    }
}
