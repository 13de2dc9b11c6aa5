// Domain layer - the automaton itself
pub mod domain;

// Application layer - viewport math and the frame loop
pub mod application;

// Infrastructure layer - input, rendering
pub mod input;
pub mod rendering;

pub mod config;
pub mod error;

// Re-exports for convenience
pub use application::{SimulationLoop, Viewport, ViewportState, ZoomDirection};
pub use config::LifeConfig;
pub use domain::{Cell, Grid};
pub use error::{ConfigError, LifeError, ViewportError};
