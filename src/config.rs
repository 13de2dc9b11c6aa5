use crate::error::ConfigError;

/// Default grid dimensions
pub const DEFAULT_ROWS: usize = 50;
pub const DEFAULT_COLS: usize = 50;

/// Display frames per second
pub const DEFAULT_DISPLAY_RATE: f64 = 30.0;

/// Generations per second
pub const DEFAULT_SIMULATION_RATE: f64 = 10.0;

/// Chance that a freshly seeded cell starts alive
pub const ALIVE_PROBABILITY: f64 = 0.2;

/// Multiplier applied per wheel notch or pinch step
pub const ZOOM_FACTOR: f64 = 1.2;

/// Screen pixels of drag are scaled by this before panning
pub const PAN_SPEED: f64 = 1.5;

pub const WINDOW_WIDTH: i32 = 800;
pub const WINDOW_HEIGHT: i32 = 800;

/// Everything needed to start a simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct LifeConfig {
    pub rows: usize,
    pub cols: usize,
    pub display_rate: f64,
    pub simulation_rate: f64,
    pub alive_probability: f64,
    pub zoom_factor: f64,
    pub pan_speed: f64,
    pub window_width: i32,
    pub window_height: i32,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            display_rate: DEFAULT_DISPLAY_RATE,
            simulation_rate: DEFAULT_SIMULATION_RATE,
            alive_probability: ALIVE_PROBABILITY,
            zoom_factor: ZOOM_FACTOR,
            pan_speed: PAN_SPEED,
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
        }
    }
}

impl LifeConfig {
    pub fn with_grid(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    pub fn with_rates(mut self, display_rate: f64, simulation_rate: f64) -> Self {
        self.display_rate = display_rate;
        self.simulation_rate = simulation_rate;
        self
    }

    pub fn with_zoom_factor(mut self, zoom_factor: f64) -> Self {
        self.zoom_factor = zoom_factor;
        self
    }

    pub fn with_pan_speed(mut self, pan_speed: f64) -> Self {
        self.pan_speed = pan_speed;
        self
    }

    pub fn with_alive_probability(mut self, probability: f64) -> Self {
        self.alive_probability = probability;
        self
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyGrid { rows: self.rows, cols: self.cols });
        }

        let rates = [
            ("display_rate", self.display_rate),
            ("simulation_rate", self.simulation_rate),
        ];
        if let Some(&(name, value)) = rates.iter().find(|(_, v)| !(v.is_finite() && *v > 0.0)) {
            return Err(ConfigError::InvalidRate { name, value });
        }

        if !(0.0..=1.0).contains(&self.alive_probability) {
            return Err(ConfigError::InvalidProbability(self.alive_probability));
        }
        if !(self.zoom_factor.is_finite() && self.zoom_factor > 1.0) {
            return Err(ConfigError::InvalidZoomFactor(self.zoom_factor));
        }
        if !(self.pan_speed.is_finite() && self.pan_speed > 0.0) {
            return Err(ConfigError::InvalidPanSpeed(self.pan_speed));
        }
        if self.window_width <= 0 || self.window_height <= 0 {
            return Err(ConfigError::InvalidWindow {
                width: self.window_width,
                height: self.window_height,
            });
        }
        Ok(())
    }

    /// Display frames per generation, never below one.
    pub fn frame_ratio(&self) -> u64 {
        frame_ratio(self.display_rate, self.simulation_rate)
    }
}

/// `round(display / simulation)`, floored at 1 so a simulation rate above
/// the display rate steps once per frame instead of dividing by zero.
pub fn frame_ratio(display_rate: f64, simulation_rate: f64) -> u64 {
    let ratio = (display_rate / simulation_rate).round();
    if ratio.is_finite() && ratio >= 1.0 {
        ratio as u64
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(LifeConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_frame_ratio_rounds() {
        assert_eq!(frame_ratio(60.0, 10.0), 6);
        assert_eq!(frame_ratio(30.0, 7.0), 4);
        assert_eq!(frame_ratio(60.0, 60.0), 1);
    }

    #[test]
    fn test_frame_ratio_never_zero() {
        assert_eq!(frame_ratio(5.0, 60.0), 1);
        assert_eq!(frame_ratio(60.0, 0.0), 1);
    }

    #[test]
    fn test_rejects_empty_grid() {
        let config = LifeConfig::default().with_grid(0, 50);
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyGrid { rows: 0, cols: 50 })
        );
    }

    #[test]
    fn test_rejects_bad_rates() {
        let config = LifeConfig::default().with_rates(60.0, -1.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRate { name: "simulation_rate", .. })
        ));

        let config = LifeConfig::default().with_rates(f64::NAN, 10.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRate { name: "display_rate", .. })
        ));
    }

    #[test]
    fn test_rejects_zoom_factor_at_one() {
        let config = LifeConfig::default().with_zoom_factor(1.0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidZoomFactor(1.0)));
    }

    #[test]
    fn test_rejects_probability_out_of_range() {
        let config = LifeConfig::default().with_alive_probability(1.5);
        assert_eq!(config.validate(), Err(ConfigError::InvalidProbability(1.5)));
    }
}
