//! Plain-vanilla option contract priced by the grid engines.
//!
//! [`VanillaOption`] stores side, strike, expiry, and exercise rights
//! ([`crate::core::ExerciseStyle`]: European/American/Bermudan).
//! Validation accepts `expiry == 0` (intrinsic-value edge case) and requires
//! Bermudan dates to lie in `[0, expiry]`; a date at `0` is an exercise right
//! on the valuation date itself.

use crate::core::{ExerciseStyle, Instrument, OptionType, PricingError};

/// Vanilla option contract.
///
/// # Examples
/// ```
/// use quantpde::core::{ExerciseStyle, OptionType};
/// use quantpde::instruments::VanillaOption;
///
/// let option = VanillaOption {
///     option_type: OptionType::Put,
///     strike: 100.0,
///     expiry: 1.0,
///     exercise: ExerciseStyle::Bermudan { dates: vec![0.0, 0.5] },
/// };
/// assert!(option.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VanillaOption {
    /// Call or put.
    pub option_type: OptionType,
    /// Strike level.
    pub strike: f64,
    /// Expiry in years.
    pub expiry: f64,
    /// Exercise style.
    pub exercise: ExerciseStyle,
}

impl VanillaOption {
    /// Builds a European call option.
    pub fn european_call(strike: f64, expiry: f64) -> Self {
        Self {
            option_type: OptionType::Call,
            strike,
            expiry,
            exercise: ExerciseStyle::European,
        }
    }

    /// Builds a European put option.
    pub fn european_put(strike: f64, expiry: f64) -> Self {
        Self {
            option_type: OptionType::Put,
            strike,
            expiry,
            exercise: ExerciseStyle::European,
        }
    }

    /// Builds an American put option.
    pub fn american_put(strike: f64, expiry: f64) -> Self {
        Self {
            option_type: OptionType::Put,
            strike,
            expiry,
            exercise: ExerciseStyle::American,
        }
    }

    /// Builds a Bermudan put exercisable `exercises` times, evenly spread
    /// over `[0, expiry)`.
    ///
    /// # Examples
    /// ```
    /// use quantpde::core::ExerciseStyle;
    /// use quantpde::instruments::VanillaOption;
    ///
    /// let put = VanillaOption::bermudan_put(100.0, 1.0, 2);
    /// assert_eq!(put.exercise, ExerciseStyle::Bermudan { dates: vec![0.0, 0.5] });
    /// ```
    pub fn bermudan_put(strike: f64, expiry: f64, exercises: usize) -> Self {
        Self {
            option_type: OptionType::Put,
            strike,
            expiry,
            exercise: ExerciseStyle::evenly_spaced(expiry, exercises),
        }
    }

    /// Payoff at spot `spot`.
    #[inline]
    pub fn payoff(&self, spot: f64) -> f64 {
        self.option_type.payoff(spot, self.strike)
    }

    /// Validates instrument fields.
    ///
    /// # Errors
    /// Returns [`PricingError::InvalidInput`] when:
    /// - `strike <= 0` or not finite
    /// - `expiry < 0` or not finite
    /// - Bermudan exercise dates are empty or outside `[0, expiry]`
    pub fn validate(&self) -> Result<(), PricingError> {
        if !self.strike.is_finite() || self.strike <= 0.0 {
            return Err(PricingError::InvalidInput(
                "vanilla strike must be finite and > 0".to_string(),
            ));
        }
        if !self.expiry.is_finite() || self.expiry < 0.0 {
            return Err(PricingError::InvalidInput(
                "vanilla expiry must be finite and >= 0".to_string(),
            ));
        }

        if let ExerciseStyle::Bermudan { dates } = &self.exercise {
            if dates.is_empty() {
                return Err(PricingError::InvalidInput(
                    "bermudan exercise dates cannot be empty".to_string(),
                ));
            }
            if dates.iter().any(|&d| !(0.0..=self.expiry).contains(&d)) {
                return Err(PricingError::InvalidInput(
                    "bermudan exercise dates must lie in [0, expiry]".to_string(),
                ));
            }
        }

        Ok(())
    }
}

impl Instrument for VanillaOption {
    fn instrument_type(&self) -> &str {
        "VanillaOption"
    }
}
