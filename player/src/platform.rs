//! Desktop collaborators: engine shell, graphics backends, winit stub

use std::path::Path;

use anyhow::Result;
use rawplay_core::{Graphics, GraphicsError, Platform, RendererSelection};

use crate::engine::RawEngine;
use crate::graphics;
use crate::stub::WinitStub;

pub struct DesktopPlatform;

impl Platform for DesktopPlatform {
    type Engine = RawEngine;
    type Stub = WinitStub;

    fn create_engine(&self, data_dir: &Path, part: i32) -> Result<RawEngine> {
        RawEngine::new(data_dir, part)
    }

    fn create_graphics(&self, selection: &RendererSelection) -> Result<Box<dyn Graphics>, GraphicsError> {
        graphics::create(selection)
    }

    fn create_stub(&self) -> Result<WinitStub> {
        WinitStub::new()
    }
}
