mod simulation;
mod viewport;

pub use simulation::{FrameTimeTicks, FrameView, ManualTicks, PARALLEL_THRESHOLD_CELLS, Renderer, SimulationLoop, TickSource};
pub use viewport::{CellRange, ScreenRect, Viewport, ViewportState, ZoomDirection};
