//! Run lifecycle
//!
//! Acquires the engine, graphics backend, and platform stub in a fixed order,
//! steps the engine until the user quits, then releases them in reverse.
//!
//! The renderer can only be resolved after the engine exists, because the
//! engine detects the content edition while it is constructed. The display
//! mode is finalized after that, so its GL flag always agrees with the
//! resolved renderer.

use crate::config::Configuration;
use crate::content::ContentEdition;
use crate::display::DisplayMode;
use crate::error::LifecycleError;
use crate::renderer::{self, RendererSelection};
use crate::system::{Engine, EngineSetup, Platform, SystemStub};

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub edition: ContentEdition,
    pub selection: RendererSelection,
    pub display: DisplayMode,
    /// Engine steps executed before quit was observed
    pub steps: u64,
}

/// Run one session of the player on `platform`.
///
/// A missing graphics backend fails before the platform stub is created.
/// Once the stub is initialized every exit path goes through teardown.
pub fn run<P: Platform>(platform: &P, config: Configuration) -> Result<RunReport, LifecycleError> {
    let mut engine = platform
        .create_engine(config.data_dir(), config.part)
        .map_err(LifecycleError::Engine)?;
    let edition = engine.content_edition();
    tracing::info!("Detected {} data in {}", edition, config.data_dir().display());

    let selection = renderer::resolve(config.renderer, edition, config.ega_palette);
    let display_mode = config.display.finalized(&selection);
    tracing::info!(
        "Renderer: {} (rgb565: {}, ega: {}), display: {:?} {}x{}",
        selection.kind,
        selection.use_16bit_packing,
        selection.use_ega_palette,
        display_mode.mode,
        display_mode.width,
        display_mode.height
    );

    let mut graphics = platform.create_graphics(&selection)?;
    let mut stub = match platform.create_stub() {
        Ok(stub) => stub,
        Err(e) => {
            graphics.fini();
            return Err(LifecycleError::Platform(e));
        }
    };

    let title = engine.game_title(config.language);
    if let Err(e) = stub.init(title, &display_mode) {
        let _ = engine.finish();
        drop(engine);
        graphics.fini();
        stub.fini();
        return Err(LifecycleError::Platform(e));
    }

    engine.attach(graphics);
    let setup = EngineSetup {
        language: config.language,
        renderer: selection,
        scaler: config.scaler.clone(),
    };

    let outcome = match engine.setup(&setup) {
        Ok(()) => run_loop(&mut engine, &mut stub),
        Err(e) => Err(e),
    };

    teardown(engine, stub);

    let steps = outcome.map_err(LifecycleError::Engine)?;
    tracing::info!("Session ended after {} steps", steps);
    Ok(RunReport {
        edition,
        selection,
        display: display_mode,
        steps,
    })
}

/// Step the engine until the stub reports quit.
fn run_loop<E: Engine, S: SystemStub>(engine: &mut E, stub: &mut S) -> anyhow::Result<u64> {
    let mut steps = 0u64;
    while !stub.quit_requested() {
        engine.run(stub)?;
        steps += 1;
    }
    Ok(steps)
}

/// Engine finish and release, then stub fini and release.
fn teardown<E: Engine, S: SystemStub>(mut engine: E, mut stub: S) {
    let graphics = engine.finish();
    drop(engine);
    if let Some(mut graphics) = graphics {
        graphics.fini();
    }
    stub.fini();
    drop(stub);
}
