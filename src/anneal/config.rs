//! Annealing configuration.

use crate::error::{GridError, Result};

/// Configuration for an optimizer run.
///
/// Cooling is geometric: after every iteration `T ← cooling_rate · T`.
/// The run stops after `max_iterations` or once `T` drops below
/// `min_temperature`, whichever comes first.
///
/// # Examples
///
/// ```
/// use gridbalance::anneal::AnnealConfig;
///
/// let config = AnnealConfig::default()
///     .with_max_iterations(20_000)
///     .with_initial_temperature(50.0)
///     .with_cooling_rate(0.999)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct AnnealConfig {
    /// Hard cap on annealing iterations.
    pub max_iterations: usize,

    /// Starting temperature `T₀`.
    pub initial_temperature: f64,

    /// Multiplicative cooling factor in (0, 1).
    pub cooling_rate: f64,

    /// Early-stop threshold on the temperature.
    pub min_temperature: f64,

    /// Best cost is sampled into the history every this many iterations.
    pub history_interval: usize,

    /// Random seed; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for AnnealConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50_000,
            initial_temperature: 100.0,
            cooling_rate: 0.9997,
            min_temperature: 1e-4,
            history_interval: 100,
            seed: None,
        }
    }
}

impl AnnealConfig {
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, alpha: f64) -> Self {
        self.cooling_rate = alpha;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_history_interval(mut self, n: usize) -> Self {
        self.history_interval = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.initial_temperature > 0.0) {
            return Err(GridError::invalid("initial_temperature must be positive"));
        }
        if !(self.min_temperature > 0.0) {
            return Err(GridError::invalid("min_temperature must be positive"));
        }
        if self.min_temperature >= self.initial_temperature {
            return Err(GridError::invalid(
                "min_temperature must be less than initial_temperature",
            ));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(GridError::invalid(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            )));
        }
        if self.history_interval == 0 {
            return Err(GridError::invalid("history_interval must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_default_config() {
        let config = AnnealConfig::default();
        assert_eq!(config.max_iterations, 50_000);
        assert!((config.initial_temperature - 100.0).abs() < 1e-10);
        assert!((config.min_temperature - 1e-4).abs() < 1e-15);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_validate_ok() {
        assert!(AnnealConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_bad_temperature() {
        let config = AnnealConfig::default().with_initial_temperature(-1.0);
        assert_eq!(
            config.validate().unwrap_err().kind(),
            ErrorKind::InvalidData
        );
    }

    #[test]
    fn test_validate_min_ge_initial() {
        let config = AnnealConfig::default()
            .with_initial_temperature(10.0)
            .with_min_temperature(20.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_cooling_rate() {
        assert!(AnnealConfig::default()
            .with_cooling_rate(1.0)
            .validate()
            .is_err());
        assert!(AnnealConfig::default()
            .with_cooling_rate(0.0)
            .validate()
            .is_err());
        assert!(AnnealConfig::default()
            .with_cooling_rate(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_zero_history_interval() {
        let config = AnnealConfig::default().with_history_interval(0);
        assert!(config.validate().is_err());
    }
}
