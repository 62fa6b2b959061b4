//! Stage: The grid, the active backend and the renderable list.
//!
//! Everything the render thread touches lives here, behind one lock held by
//! the [`Renderer`](super::Renderer). Registration changes, ticks and resizes
//! all take that lock, so a flush never races a mutation.

use crate::backend::Backend;
use crate::buffer::Grid;
use crate::error::Result;
use crate::widget::{Renderable, RenderableId};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Shared handle to a registered producer.
pub type SharedRenderable = Arc<Mutex<dyn Renderable>>;

/// Builds a fresh backend after a resize.
pub type BackendFactory = Box<dyn FnMut() -> Result<Box<dyn Backend>> + Send>;

/// Counters kept across ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Ticks run.
    pub ticks: u64,
    /// Ticks that wrote a frame.
    pub frames: u64,
    /// Ticks whose flush failed.
    pub flush_failures: u64,
}

/// What one tick did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Producers cleared and dropped this tick.
    pub removed: usize,
    /// Producers rendered this tick.
    pub rendered: usize,
    /// Whether the backend wrote a frame.
    pub flushed: bool,
}

struct Entry {
    id: RenderableId,
    renderable: SharedRenderable,
    removing: bool,
}

/// Render-thread state.
pub struct Stage {
    grid: Grid,
    backend: Box<dyn Backend>,
    factory: Option<BackendFactory>,
    entries: Vec<Entry>,
    next_id: u64,
    stats: FrameStats,
}

impl Stage {
    /// Create a stage around a grid and a backend.
    ///
    /// With a `factory`, [`resize`](Self::resize) replaces the backend;
    /// without one it keeps the current backend and only clears the screen.
    pub fn new(grid: Grid, backend: Box<dyn Backend>, factory: Option<BackendFactory>) -> Self {
        Self {
            grid,
            backend,
            factory,
            entries: Vec::new(),
            next_id: 0,
            stats: FrameStats::default(),
        }
    }

    /// The grid.
    #[inline]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The grid, mutably.
    #[inline]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// The active backend.
    #[inline]
    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    /// Counters so far.
    #[inline]
    pub const fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Number of registered producers, including those pending removal.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add a producer. It is rendered from the next tick on.
    pub fn register(&mut self, renderable: SharedRenderable) -> RenderableId {
        let id = RenderableId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            renderable,
            removing: false,
        });
        log::debug!("registered renderable {}", id.get());
        id
    }

    /// Mark a producer for removal. It is cleared and dropped on the next
    /// tick. Returns `false` if the id is unknown.
    pub fn unregister(&mut self, id: RenderableId) -> bool {
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => {
                entry.removing = true;
                log::debug!("unregistered renderable {}", id.get());
                true
            }
            None => false,
        }
    }

    /// Run one tick: clear and drop removed producers, render the rest in
    /// layer order, then flush.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the flush failed. Producers have
    /// already been rendered by then and the backend retries next tick.
    pub fn tick(&mut self) -> Result<TickReport> {
        self.stats.ticks += 1;
        let mut report = TickReport::default();

        let grid = &mut self.grid;
        self.entries.retain(|entry| {
            let mut renderable = entry.renderable.lock();
            if entry.removing || renderable.is_removed() {
                renderable.clear(grid);
                report.removed += 1;
                false
            } else {
                true
            }
        });

        // Stable sort: equal layers keep registration order.
        self.entries.sort_by_cached_key(|entry| entry.renderable.lock().layer());
        for entry in &self.entries {
            entry.renderable.lock().render(&mut self.grid);
            report.rendered += 1;
        }

        match self.backend.flush(&mut self.grid) {
            Ok(flushed) => {
                if flushed {
                    self.stats.frames += 1;
                }
                report.flushed = flushed;
                Ok(report)
            }
            Err(e) => {
                self.stats.flush_failures += 1;
                Err(e)
            }
        }
    }

    /// Replace the grid with a blank one of the new size, rebuild the
    /// backend if a factory is set, and clear the screen.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSize`](crate::Error::InvalidSize) for a zero
    /// dimension, or the factory's or backend's error. The old grid is kept
    /// on failure.
    pub fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        let grid = Grid::new(width, height)?;
        if let Some(factory) = self.factory.as_mut() {
            self.backend = factory()?;
        }
        self.backend.clear_screen()?;
        self.grid = grid;
        log::debug!("resized to {width}x{height}");
        Ok(())
    }
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage")
            .field("grid", &self.grid)
            .field("mode", &self.backend.mode())
            .field("renderables", &self.entries.len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
