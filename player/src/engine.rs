//! Engine shell
//!
//! Owns the detected content, the bound graphics backend, and frame pacing.
//! Bytecode interpretation is not part of this build: each step polls input
//! and presents the palette test card at the engine's native 50 Hz tick.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow, bail};

use rawplay_core::config::DEFAULT_PART;
use rawplay_core::system::{PAGE_HEIGHT, PAGE_WIDTH};
use rawplay_core::{
    Color, ContentEdition, Engine, EngineSetup, Graphics, Language, Palette, SystemStub,
};

/// Duration of one engine tick (50 Hz).
pub const TICK: Duration = Duration::from_millis(20);

/// Copy-protection screen.
pub const PART_PROTECTION: i32 = 16000;
/// Last playable part.
pub const PART_LAST: i32 = 16009;
/// Highest raw part index.
pub const RAW_PART_MAX: i32 = 35;

/// The fixed EGA palette used by the DOS release on EGA adapters.
pub const EGA_PALETTE: Palette = [
    Color::new(0x00, 0x00, 0x00),
    Color::new(0x00, 0x00, 0xAA),
    Color::new(0x00, 0xAA, 0x00),
    Color::new(0x00, 0xAA, 0xAA),
    Color::new(0xAA, 0x00, 0x00),
    Color::new(0xAA, 0x00, 0xAA),
    Color::new(0xAA, 0x55, 0x00),
    Color::new(0xAA, 0xAA, 0xAA),
    Color::new(0x55, 0x55, 0x55),
    Color::new(0x55, 0x55, 0xFF),
    Color::new(0x55, 0xFF, 0x55),
    Color::new(0x55, 0xFF, 0xFF),
    Color::new(0xFF, 0x55, 0x55),
    Color::new(0xFF, 0x55, 0xFF),
    Color::new(0xFF, 0xFF, 0x55),
    Color::new(0xFF, 0xFF, 0xFF),
];

/// Palette used until the game loads its own: a 16-step grey ramp.
pub fn default_palette() -> Palette {
    std::array::from_fn(|i| {
        let level = (i as u8) * 0x11;
        Color::new(level, level, level)
    })
}

/// Palette for a setup.
pub fn palette_for(setup: &EngineSetup) -> Palette {
    if setup.renderer.use_ega_palette {
        EGA_PALETTE
    } else {
        default_palette()
    }
}

/// Clamp out-of-range parts to the intro.
pub fn validate_part(part: i32) -> i32 {
    if (0..=RAW_PART_MAX).contains(&part) || (PART_PROTECTION..=PART_LAST).contains(&part) {
        part
    } else {
        tracing::warn!("Invalid part {}, starting from {}", part, DEFAULT_PART);
        DEFAULT_PART
    }
}

pub struct RawEngine {
    data_dir: PathBuf,
    edition: ContentEdition,
    part: i32,
    graphics: Option<Box<dyn Graphics>>,
    setup: Option<EngineSetup>,
    frame: u64,
    next_tick: Option<Instant>,
}

impl RawEngine {
    /// Open the data directory and detect its edition.
    pub fn new(data_dir: &Path, part: i32) -> Result<Self> {
        let edition = ContentEdition::detect(data_dir)
            .ok_or_else(|| anyhow!("no Another World data found in {}", data_dir.display()))?;
        let part = validate_part(part);
        tracing::info!("Opened {} data, starting at part {}", edition, part);

        Ok(Self {
            data_dir: data_dir.to_path_buf(),
            edition,
            part,
            graphics: None,
            setup: None,
            frame: 0,
            next_tick: None,
        })
    }

    pub fn part(&self) -> i32 {
        self.part
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Draw one column per palette entry.
    fn draw_test_card(graphics: &mut dyn Graphics, page: usize) {
        graphics.fill_page(page, 0);
        let column = PAGE_WIDTH / 16;
        for color in 0..16u8 {
            graphics.fill_rect(page, u32::from(color) * column, 0, column, PAGE_HEIGHT, color);
        }
    }

    /// Sleep until the next tick boundary.
    fn pace(&mut self, stub: &mut dyn SystemStub) {
        let now = Instant::now();
        let deadline = self.next_tick.unwrap_or(now);
        if deadline > now {
            stub.sleep(deadline - now);
        }
        // Resync after long stalls instead of fast-forwarding
        self.next_tick = Some(deadline.max(now) + TICK);
    }
}

impl Engine for RawEngine {
    fn content_edition(&self) -> ContentEdition {
        self.edition
    }

    fn game_title(&self, language: Language) -> &'static str {
        self.edition.game_title(language)
    }

    fn attach(&mut self, graphics: Box<dyn Graphics>) {
        self.graphics = Some(graphics);
    }

    fn setup(&mut self, setup: &EngineSetup) -> Result<()> {
        let graphics = self
            .graphics
            .as_deref_mut()
            .context("engine setup before a graphics backend was attached")?;

        graphics.init()?;
        graphics.set_palette(&palette_for(setup));
        graphics.set_scaler(&setup.scaler);
        Self::draw_test_card(graphics, 0);

        tracing::info!(
            "Engine ready: language {}, renderer {}, scaler '{}'x{}",
            setup.language,
            setup.renderer.kind,
            setup.scaler.name,
            setup.scaler.factor
        );
        self.setup = Some(setup.clone());
        Ok(())
    }

    fn run(&mut self, stub: &mut dyn SystemStub) -> Result<()> {
        if self.setup.is_none() {
            bail!("engine step before setup");
        }
        stub.process_events();
        if stub.quit_requested() {
            return Ok(());
        }

        let graphics = self
            .graphics
            .as_deref_mut()
            .context("engine step without a graphics backend")?;
        graphics.present(0, stub)?;
        self.frame += 1;
        if self.frame % 500 == 0 {
            tracing::debug!("Frame {}", self.frame);
        }

        self.pace(stub);
        Ok(())
    }

    fn finish(&mut self) -> Option<Box<dyn Graphics>> {
        tracing::info!("Engine finished after {} frames", self.frame);
        self.setup = None;
        self.graphics.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rawplay_core::{RendererKind, ScalerSpec, resolve};
    use tempfile::TempDir;

    fn dos_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("MEMLIST.BIN"), b"").unwrap();
        dir
    }

    fn setup_for(edition: ContentEdition, ega: bool) -> EngineSetup {
        EngineSetup {
            language: Language::Fr,
            renderer: resolve(None, edition, ega),
            scaler: ScalerSpec::default(),
        }
    }

    #[test]
    fn test_new_detects_edition() {
        let dir = dos_dir();
        let engine = RawEngine::new(dir.path(), 16001).unwrap();
        assert_eq!(engine.content_edition(), ContentEdition::Dos);
        assert_eq!(engine.part(), 16001);
        assert_eq!(engine.data_dir(), dir.path());
    }

    #[test]
    fn test_new_without_data_fails() {
        let dir = TempDir::new().unwrap();
        let err = RawEngine::new(dir.path(), 16001).err().expect("no data");
        assert!(err.to_string().contains("no Another World data"));
    }

    #[test]
    fn test_validate_part() {
        assert_eq!(validate_part(0), 0);
        assert_eq!(validate_part(35), 35);
        assert_eq!(validate_part(16000), 16000);
        assert_eq!(validate_part(16009), 16009);
        assert_eq!(validate_part(36), DEFAULT_PART);
        assert_eq!(validate_part(-1), DEFAULT_PART);
        assert_eq!(validate_part(16010), DEFAULT_PART);
    }

    #[test]
    fn test_ega_palette_selection() {
        let setup = setup_for(ContentEdition::Dos, true);
        assert_eq!(palette_for(&setup), EGA_PALETTE);

        let setup = setup_for(ContentEdition::Amiga, true);
        assert_eq!(palette_for(&setup), default_palette());
        assert_eq!(setup.renderer.kind, RendererKind::Original);
    }

    #[test]
    fn test_default_palette_ramp() {
        let palette = default_palette();
        assert_eq!(palette[0], Color::new(0, 0, 0));
        assert_eq!(palette[15], Color::new(0xFF, 0xFF, 0xFF));
    }

    #[test]
    fn test_setup_requires_graphics() {
        let dir = dos_dir();
        let mut engine = RawEngine::new(dir.path(), 16001).unwrap();
        assert!(engine.setup(&setup_for(ContentEdition::Dos, false)).is_err());
        assert!(engine.finish().is_none());
    }
}
