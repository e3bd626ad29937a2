/// Plain-vanilla option side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionType {
    /// Call option payoff profile.
    Call,
    /// Put option payoff profile.
    Put,
}

impl OptionType {
    /// Returns +1.0 for calls and -1.0 for puts.
    pub fn sign(self) -> f64 {
        match self {
            Self::Call => 1.0,
            Self::Put => -1.0,
        }
    }

    /// Intrinsic value `max(sign * (S - K), 0)`.
    #[inline]
    pub fn payoff(self, spot: f64, strike: f64) -> f64 {
        (self.sign() * (spot - strike)).max(0.0)
    }
}

/// Exercise rights for an option contract.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum ExerciseStyle {
    /// Exercise only at expiry.
    European,
    /// Exercise at any time up to expiry.
    American,
    /// Exercise at specific times (in year fractions).
    Bermudan { dates: Vec<f64> },
}

impl ExerciseStyle {
    /// Bermudan schedule of `count` events spread evenly over `[0, expiry)`,
    /// the first one falling on the valuation date.
    ///
    /// # Examples
    /// ```
    /// use quantpde::core::ExerciseStyle;
    ///
    /// let style = ExerciseStyle::evenly_spaced(1.0, 4);
    /// assert_eq!(style, ExerciseStyle::Bermudan { dates: vec![0.0, 0.25, 0.5, 0.75] });
    /// ```
    pub fn evenly_spaced(expiry: f64, count: usize) -> Self {
        if count == 0 {
            return Self::European;
        }
        let dates = (0..count)
            .map(|m| expiry / count as f64 * m as f64)
            .collect();
        Self::Bermudan { dates }
    }
}
