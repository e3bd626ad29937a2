//! Driver configuration for the Bermudan put pricer.
//!
//! Every field has a default, so a JSON payload only needs the values it
//! overrides:
//!
//! ```rust
//! use quantpde::config::BermudanPutConfig;
//!
//! let config = BermudanPutConfig::from_json_str(r#"{ "refinement": 2, "time_steps": 100 }"#)
//!     .expect("valid config");
//! assert_eq!(config.refinement, 2);
//! assert_eq!(config.strike, 100.0);
//! ```

use crate::core::PricingError;
use crate::grid::{Axis, NewTickBetweenEachPair, RectilinearGrid1};
use crate::instruments::VanillaOption;
use crate::market::Market;

/// Ticks of the base spot grid, dense around the default strike and
/// stretched out to a far-field boundary.
pub const BASE_SPOT_TICKS: [f64; 34] = [
    0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 75.0, 80.0, 84.0, 88.0, 92.0, 94.0, 96.0, 98.0,
    100.0, 102.0, 104.0, 106.0, 108.0, 110.0, 114.0, 118.0, 123.0, 130.0, 140.0, 150.0, 175.0,
    225.0, 300.0, 750.0, 2_000.0, 10_000.0,
];

/// Contract, market and discretization settings of the driver.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BermudanPutConfig {
    /// Strike price.
    pub strike: f64,
    /// Expiry in years.
    pub expiry: f64,
    /// Risk-free rate.
    pub rate: f64,
    /// Flat volatility.
    pub vol: f64,
    /// Continuous dividend yield.
    pub dividend_yield: f64,
    /// Number of midpoint refinements of the base grid.
    pub refinement: u32,
    /// Number of exercise events spread evenly over `[0, expiry)`.
    pub exercises: usize,
    /// Number of backward time steps.
    pub time_steps: usize,
    /// Spot at which the headline price is reported.
    pub spot: f64,
}

impl Default for BermudanPutConfig {
    fn default() -> Self {
        Self {
            strike: 100.0,
            expiry: 1.0,
            rate: 0.04,
            vol: 0.2,
            dividend_yield: 0.0,
            refinement: 0,
            exercises: 10,
            time_steps: 25,
            spot: 100.0,
        }
    }
}

impl BermudanPutConfig {
    /// Parses and validates a JSON payload.
    pub fn from_json_str(payload: &str) -> Result<Self, PricingError> {
        let config: Self = crate::core::from_json(payload)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the pricer cannot run with.
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.time_steps == 0 {
            return Err(PricingError::InvalidInput(
                "the number of steps must be positive".to_string(),
            ));
        }
        if !self.expiry.is_finite() || self.expiry <= 0.0 {
            return Err(PricingError::InvalidInput(
                "expiry time must be positive".to_string(),
            ));
        }
        if !self.strike.is_finite() || self.strike <= 0.0 {
            return Err(PricingError::InvalidInput(
                "strike must be positive".to_string(),
            ));
        }
        if !self.vol.is_finite() || self.vol <= 0.0 {
            return Err(PricingError::InvalidInput(
                "volatility must be positive".to_string(),
            ));
        }
        // Each refinement roughly doubles the grid.
        if self.refinement > 16 {
            return Err(PricingError::InvalidInput(
                "the maximum level of refinement must be <= 16".to_string(),
            ));
        }
        Ok(())
    }

    /// Base grid refined `refinement` times.
    pub fn grid(&self) -> RectilinearGrid1 {
        RectilinearGrid1::new(Axis::new(BASE_SPOT_TICKS))
            .refined(&NewTickBetweenEachPair, self.refinement)
    }

    pub fn instrument(&self) -> VanillaOption {
        VanillaOption::bermudan_put(self.strike, self.expiry, self.exercises)
    }

    pub fn market(&self) -> Result<Market, PricingError> {
        Market::builder()
            .spot(self.spot)
            .rate(self.rate)
            .dividend_yield(self.dividend_yield)
            .flat_vol(self.vol)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_driver() {
        let config = BermudanPutConfig::default();
        assert_eq!(config.exercises, 10);
        assert_eq!(config.time_steps, 25);
        assert_eq!(config.refinement, 0);
        assert!(config.validate().is_ok());
        assert_eq!(config.grid().size(), BASE_SPOT_TICKS.len());
    }

    #[test]
    fn refinement_densifies_base_grid() {
        let config = BermudanPutConfig {
            refinement: 2,
            ..BermudanPutConfig::default()
        };
        assert_eq!(config.grid().size(), 4 * (BASE_SPOT_TICKS.len() - 1) + 1);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = BermudanPutConfig::from_json_str(r#"{"vol": 0.3}"#).unwrap();
        assert_eq!(config.vol, 0.3);
        assert_eq!(config.rate, 0.04);
    }

    #[test]
    fn invalid_payloads_are_rejected() {
        assert!(matches!(
            BermudanPutConfig::from_json_str(r#"{"time_steps": 0}"#),
            Err(PricingError::InvalidInput(_))
        ));
        assert!(matches!(
            BermudanPutConfig::from_json_str(r#"{"expiry": -1.0}"#),
            Err(PricingError::InvalidInput(_))
        ));
        assert!(matches!(
            BermudanPutConfig::from_json_str(r#"{"strikes": 1.0}"#),
            Err(PricingError::Serialization(_))
        ));
        assert!(matches!(
            BermudanPutConfig::from_json_str("not json"),
            Err(PricingError::Serialization(_))
        ));
    }
}
