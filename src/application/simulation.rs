use std::sync::Arc;

use crate::application::Viewport;
use crate::config::LifeConfig;
use crate::domain::Grid;
use crate::error::Result;

/// Grids with more cells than this step on the rayon pool
pub const PARALLEL_THRESHOLD_CELLS: usize = 200 * 200;

/// Supplies display-frame ticks to the loop.
/// The window drives one from frame time; tests hand out a fixed number.
pub trait TickSource {
    /// Whether a display frame is due now; consumes it if so.
    fn next_tick(&mut self) -> bool;
}

/// Tick source that yields a fixed number of frames
#[derive(Clone, Copy, Debug)]
pub struct ManualTicks {
    remaining: u64,
}

impl ManualTicks {
    pub fn new(ticks: u64) -> Self {
        Self { remaining: ticks }
    }
}

impl TickSource for ManualTicks {
    fn next_tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}

/// Ticks at a fixed display rate from accumulated frame time.
/// The window feeds it `get_frame_time()` once per refresh; a slow frame
/// yields one tick and the surplus is dropped rather than replayed.
#[derive(Clone, Copy, Debug)]
pub struct FrameTimeTicks {
    interval: f64,
    elapsed: f64,
}

impl FrameTimeTicks {
    /// Rates outside (0, inf) fall back to one tick per second
    pub fn new(rate: f64) -> Self {
        let rate = if rate.is_finite() && rate > 0.0 { rate } else { 1.0 };
        Self {
            interval: 1.0 / rate,
            elapsed: 0.0,
        }
    }

    /// Seconds between ticks
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Add the duration of the frame just shown
    pub fn advance(&mut self, delta_seconds: f64) {
        if delta_seconds.is_finite() && delta_seconds > 0.0 {
            self.elapsed += delta_seconds;
        }
    }
}

impl TickSource for FrameTimeTicks {
    fn next_tick(&mut self) -> bool {
        if self.elapsed < self.interval {
            return false;
        }
        self.elapsed -= self.interval;
        if self.elapsed >= self.interval {
            self.elapsed = 0.0;
        }
        true
    }
}

/// Everything a renderer may look at for one frame
pub struct FrameView<'a> {
    pub grid: &'a Grid,
    pub viewport: &'a Viewport,
    pub generation: u64,
    pub frame_tick: u64,
    pub paused: bool,
}

/// Consumes one frame of state; drawing policy lives behind this.
pub trait Renderer {
    fn render(&mut self, frame: &FrameView<'_>);
}

/// SimulationLoop renders every display frame and steps the automaton
/// once every `frame_ratio` frames.
///
/// The grid sits behind an `Arc` and is swapped wholesale on each step,
/// so a handle taken before a step keeps seeing the old generation.
pub struct SimulationLoop {
    grid: Arc<Grid>,
    viewport: Viewport,
    frame_tick: u64,
    frame_ratio: u64,
    generation: u64,
    paused: bool,
}

impl SimulationLoop {
    pub fn new(grid: Grid, viewport: Viewport, frame_ratio: u64) -> Self {
        Self {
            grid: Arc::new(grid),
            viewport,
            frame_tick: 0,
            frame_ratio: frame_ratio.max(1),
            generation: 0,
            paused: false,
        }
    }

    /// Validate the config and seed a random grid sized to the window
    pub fn from_config(config: &LifeConfig) -> Result<Self> {
        config.validate()?;
        let grid = Grid::random_with_density(config.rows, config.cols, config.alive_probability);
        let viewport = Viewport::for_surface(config.rows, config.cols, config.window_width as f64)?;
        log::info!(
            "seeded {}x{} grid with {} live cells, {} frames per generation",
            config.rows,
            config.cols,
            grid.population(),
            config.frame_ratio()
        );
        Ok(Self::new(grid, viewport, config.frame_ratio()))
    }

    /// One display frame: render, then step if this tick is due.
    /// Returns whether the grid advanced.
    pub fn frame<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> bool {
        self.redraw(renderer);

        let due = !self.paused && self.frame_tick % self.frame_ratio == 0;
        if due {
            self.advance();
        }
        self.frame_tick += 1;
        due
    }

    /// Render without counting a display frame, for refreshes between ticks
    pub fn redraw<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        renderer.render(&FrameView {
            grid: &self.grid,
            viewport: &self.viewport,
            generation: self.generation,
            frame_tick: self.frame_tick,
            paused: self.paused,
        });
    }

    /// Drive frames while the tick source has one due; returns frames run
    pub fn run<T, R>(&mut self, ticks: &mut T, renderer: &mut R) -> u64
    where
        T: TickSource + ?Sized,
        R: Renderer + ?Sized,
    {
        let mut frames = 0;
        while ticks.next_tick() {
            self.frame(renderer);
            frames += 1;
        }
        frames
    }

    fn advance(&mut self) {
        let (rows, cols) = self.grid.dimensions();
        let next = if rows * cols > PARALLEL_THRESHOLD_CELLS {
            self.grid.step_parallel()
        } else {
            self.grid.step()
        };
        self.grid = Arc::new(next);
        self.generation += 1;
        log::trace!("generation {} population {}", self.generation, self.grid.population());
    }

    /// Follow a surface width change. A rejected width (zero while
    /// minimized, say) is logged and the previous cell size kept;
    /// returns whether the new width took effect.
    pub fn resize_surface(&mut self, surface_width: f64) -> bool {
        match self.viewport.resize_surface(surface_width) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("keeping cell size {:.3}: {}", self.viewport.cell_size(), err);
                false
            }
        }
    }

    /// Replace the grid with a fresh random one and restart counting
    pub fn randomize(&mut self, probability: f64) {
        let (rows, cols) = self.grid.dimensions();
        self.grid = Arc::new(Grid::random_with_density(rows, cols, probability));
        self.generation = 0;
        log::info!("reseeded grid, {} live cells", self.grid.population());
    }

    pub fn toggle_paused(&mut self) {
        self.paused = !self.paused;
        log::info!("{}", if self.paused { "paused" } else { "running" });
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Shared handle to the current generation
    pub fn grid_handle(&self) -> Arc<Grid> {
        Arc::clone(&self.grid)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn frame_tick(&self) -> u64 {
        self.frame_tick
    }

    pub fn frame_ratio(&self) -> u64 {
        self.frame_ratio
    }
}
