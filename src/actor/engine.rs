//! Renderer: The context object producers draw through.
//!
//! A `Renderer` owns the stage, the scheduler thread and the terminal
//! session. Construct one, hand producers to [`Renderer::register`], and drop
//! it to stop rendering and restore the terminal.

use super::stage::{BackendFactory, FrameStats, Stage, TickReport};
use super::ticker::Scheduler;
use crate::backend::{self, Backend, RenderMode};
use crate::buffer::Grid;
use crate::config::RendererConfig;
use crate::error::{Error, Result};
use crate::terminal::TerminalSession;
use crate::widget::{Renderable, RenderableId};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// The renderer context.
///
/// Do not call back into the renderer while holding a registered
/// producer's lock; the render thread takes the stage lock first.
#[derive(Debug)]
pub struct Renderer {
    /// Grid, backend and producers, shared with the render thread.
    stage: Arc<Mutex<Stage>>,
    /// Running scheduler, if started.
    scheduler: Option<Scheduler>,
    tick_interval: Duration,
    mode: RenderMode,
    /// Dropped after the scheduler so the last frame lands on the
    /// session's screen.
    session: Option<TerminalSession>,
}

impl Renderer {
    /// Bring up a renderer on the controlling terminal and start ticking.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BackendUnavailable`] if the terminal cannot be
    /// reached, [`Error::UnknownMode`] for a bad `TERMFRAME_MODE` value, or
    /// an I/O error if entering the terminal session fails.
    pub fn new(config: RendererConfig) -> Result<Self> {
        let mode = config.mode.resolve()?;
        let (width, height) = TerminalSession::size()
            .map_err(|e| Error::BackendUnavailable(format!("terminal size: {e}")))?;

        let depth = config.color_depth;
        let backend = backend::create(mode, depth)?;
        let factory: BackendFactory = Box::new(move || backend::create(mode, depth));
        let grid = Grid::new(width, height)?;
        let session = TerminalSession::enter(config.alternate_screen, config.hide_cursor)?;

        log::debug!("renderer up: {mode:?}, {width}x{height}");
        let mut renderer = Self {
            stage: Arc::new(Mutex::new(Stage::new(grid, backend, Some(factory)))),
            scheduler: None,
            tick_interval: config.tick_interval,
            mode,
            session: Some(session),
        };
        renderer.start()?;
        Ok(renderer)
    }

    /// Build a headless renderer around any backend.
    ///
    /// Nothing ticks until [`start`](Self::start) or
    /// [`tick_now`](Self::tick_now) is called, and the terminal is left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSize`] for a zero dimension.
    pub fn with_backend<B: Backend + 'static>(width: u16, height: u16, backend: B) -> Result<Self> {
        let mode = backend.mode();
        let grid = Grid::new(width, height)?;
        Ok(Self {
            stage: Arc::new(Mutex::new(Stage::new(grid, Box::new(backend), None))),
            scheduler: None,
            tick_interval: crate::config::DEFAULT_TICK_INTERVAL,
            mode,
            session: None,
        })
    }

    /// Set the tick interval used by the next [`start`](Self::start).
    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// The active output strategy.
    pub const fn mode(&self) -> RenderMode {
        self.mode
    }

    /// The tick interval.
    pub const fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Whether the scheduler thread is running.
    pub const fn is_running(&self) -> bool {
        self.scheduler.is_some()
    }

    /// Current grid size.
    pub fn size(&self) -> (u16, u16) {
        let stage = self.stage.lock();
        (stage.grid().width(), stage.grid().height())
    }

    /// Counters so far.
    pub fn stats(&self) -> FrameStats {
        self.stage.lock().stats()
    }

    /// Start the scheduler thread. Does nothing if it is already running.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the thread.
    pub fn start(&mut self) -> Result<()> {
        if self.scheduler.is_none() {
            self.scheduler = Some(Scheduler::spawn(Arc::clone(&self.stage), self.tick_interval)?);
        }
        Ok(())
    }

    /// Stop the scheduler thread and wait for it. The tick in progress, if
    /// any, completes first.
    pub fn stop(&mut self) {
        if let Some(scheduler) = self.scheduler.take() {
            scheduler.join();
        }
    }

    /// Add a producer. It is rendered from the next tick on.
    pub fn register<R: Renderable + 'static>(&self, renderable: Arc<Mutex<R>>) -> RenderableId {
        self.stage.lock().register(renderable)
    }

    /// Mark a producer for removal. On the next tick it is asked to clear
    /// its region, then dropped. Returns `false` for an unknown id.
    pub fn unregister(&self, id: RenderableId) -> bool {
        self.stage.lock().unregister(id)
    }

    /// Draw directly on the grid under the stage lock.
    ///
    /// The closure runs between ticks, never during a flush.
    pub fn with_grid<T>(&self, f: impl FnOnce(&mut Grid) -> T) -> T {
        f(self.stage.lock().grid_mut())
    }

    /// Run one tick on the calling thread.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the flush failed.
    pub fn tick_now(&self) -> Result<TickReport> {
        self.stage.lock().tick()
    }

    /// Tear down and recreate the grid and backend at a new size. The screen
    /// is cleared and producers repaint on the next tick.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSize`] for a zero dimension, or the backend's
    /// error.
    pub fn resize(&self, width: u16, height: u16) -> Result<()> {
        self.stage.lock().resize(width, height)
    }

    /// Follow the terminal's current size.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the size cannot be read, or any
    /// [`resize`](Self::resize) error.
    pub fn fit_terminal(&self) -> Result<()> {
        let (width, height) = TerminalSession::size()?;
        if self.size() != (width, height) {
            self.resize(width, height)?;
        }
        Ok(())
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        self.stop();
        // Restore the terminal after the last frame.
        self.session.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::StreamRenderer;
    use crate::buffer::{Attributes, Color};
    use crate::config::ColorDepth;
    use crate::layout::{Alignment, Coord};
    use std::io::{self, Write};
    use std::time::Instant;

    #[derive(Clone, Default)]
    struct SharedWriter(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Two-character label at the origin.
    struct Label(&'static str);

    impl Renderable for Label {
        fn render(&mut self, grid: &mut Grid) {
            grid.print(
                0,
                0,
                self.0,
                Color::WHITE,
                Color::Unset,
                Alignment::Left,
                Attributes::empty(),
            );
        }

        fn clear(&mut self, grid: &mut Grid) {
            grid.clear_rect(Coord::ZERO, Coord::new(2, 1));
        }
    }

    fn headless() -> (Renderer, SharedWriter) {
        let out = SharedWriter::default();
        let backend = StreamRenderer::new(out.clone(), ColorDepth::TrueColor);
        (Renderer::with_backend(8, 2, backend).unwrap(), out)
    }

    #[test]
    fn test_headless_tick() {
        let (renderer, out) = headless();
        assert_eq!(renderer.mode(), RenderMode::Ansi);
        assert!(!renderer.is_running());

        renderer.register(Arc::new(Mutex::new(Label("hi"))));
        assert!(renderer.tick_now().unwrap().flushed);
        let text = String::from_utf8(out.0.lock().clone()).unwrap();
        assert!(text.contains("hi"));
        assert!(text.ends_with("\x1b[0m"));
    }

    #[test]
    fn test_unregister_blanks_region() {
        let (renderer, out) = headless();
        let id = renderer.register(Arc::new(Mutex::new(Label("hi"))));
        renderer.tick_now().unwrap();
        out.0.lock().clear();

        assert!(renderer.unregister(id));
        let report = renderer.tick_now().unwrap();
        assert_eq!(report.removed, 1);
        assert!(report.flushed);
        let text = String::from_utf8(out.0.lock().clone()).unwrap();
        assert!(text.contains("\x1b[0m  "));
    }

    #[test]
    fn test_with_grid_and_resize() {
        let (renderer, _) = headless();
        renderer.with_grid(|grid| grid.draw_rect(Coord::ZERO, Coord::ONE, Color::RED));
        assert!(renderer.with_grid(|grid| !grid.get(0, 0).unwrap().is_empty()));

        renderer.resize(4, 3).unwrap();
        assert_eq!(renderer.size(), (4, 3));
        assert!(renderer.with_grid(|grid| grid.get(0, 0).unwrap().is_empty()));
        assert!(matches!(renderer.resize(0, 3), Err(Error::InvalidSize { .. })));
    }

    #[test]
    fn test_start_and_stop() {
        let (renderer, _) = headless();
        let mut renderer = renderer.with_tick_interval(Duration::from_millis(5));
        renderer.start().unwrap();
        assert!(renderer.is_running());

        let deadline = Instant::now() + Duration::from_secs(2);
        while renderer.stats().ticks == 0 && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }
        renderer.stop();
        assert!(!renderer.is_running());
        assert!(renderer.stats().ticks > 0);
    }
}
