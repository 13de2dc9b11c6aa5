//! Error types for the viewport, configuration and the crate as a whole.

use thiserror::Error;

/// Rejected inputs to the viewport math.
/// The viewport is left unchanged whenever one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ViewportError {
    /// Zoom factors must be finite and strictly greater than 1.
    #[error("zoom factor must be finite and greater than 1, got {0}")]
    InvalidZoomFactor(f64),

    /// The zoom would leave the range of finite positive floats
    /// (reached only after thousands of consecutive steps one way).
    #[error("zoom level {0} is not representable")]
    ZoomOutOfRange(f64),

    /// Cell sizes must be finite and strictly positive.
    #[error("cell size must be finite and positive, got {0}")]
    InvalidCellSize(f64),
}

/// Configuration values that cannot drive a simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be non-zero, got {rows}x{cols}")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("{name} must be finite and positive, got {value}")]
    InvalidRate { name: &'static str, value: f64 },

    #[error("alive probability must lie in [0, 1], got {0}")]
    InvalidProbability(f64),

    #[error("zoom factor must be finite and greater than 1, got {0}")]
    InvalidZoomFactor(f64),

    #[error("pan speed must be finite and positive, got {0}")]
    InvalidPanSpeed(f64),

    #[error("window size must be positive, got {width}x{height}")]
    InvalidWindow { width: i32, height: i32 },
}

/// Top-level error for anything the binary can hit.
#[derive(Debug, Error)]
pub enum LifeError {
    #[error("viewport error: {0}")]
    Viewport(#[from] ViewportError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T, E = LifeError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_error_converts_into_life_error() {
        let err: LifeError = ViewportError::InvalidZoomFactor(0.5).into();
        assert!(matches!(err, LifeError::Viewport(ViewportError::InvalidZoomFactor(_))));
        assert!(err.to_string().contains("0.5"));
    }

    #[test]
    fn test_config_error_message_names_field() {
        let err = ConfigError::InvalidRate { name: "display_rate", value: 0.0 };
        assert_eq!(err.to_string(), "display_rate must be finite and positive, got 0");
    }
}
