use tracing::debug;

use crate::core::{
    DiagKey, Diagnostics, ExerciseStyle, PricingEngine, PricingError, PricingResult,
};
use crate::grid::{Axis, RectilinearGrid1};
use crate::instruments::vanilla::VanillaOption;
use crate::market::Market;

use super::fd_common::{
    build_operator_coefficients, exercise_steps, interpolate_on_grid, solve_tridiagonal_inplace,
    upper_boundary,
};

/// Option values on every node of a spot axis at the valuation date.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSolution {
    axis: Axis,
    values: Vec<f64>,
}

impl GridSolution {
    /// Spot nodes.
    #[inline]
    pub fn axis(&self) -> &Axis {
        &self.axis
    }

    /// One value per node of [`Self::axis`].
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Linearly interpolated value at `spot`, flat outside the grid.
    pub fn value_at(&self, spot: f64) -> f64 {
        interpolate_on_grid(spot, self.axis.ticks(), &self.values)
    }

    /// Values interpolated onto every tick of `target`.
    pub fn image(&self, target: &Axis) -> Vec<f64> {
        target.iter().map(|&s| self.value_at(s)).collect()
    }
}

/// Backward BDF2 finite-difference engine for the Black-Scholes PDE on an
/// arbitrary (non-uniform) spot grid.
///
/// Steps are constant in time. The first step after expiry and the first step
/// after every exercise event fall back to implicit Euler, since the
/// two-level history straddles the payoff discontinuity there.
#[derive(Debug, Clone)]
pub struct Bdf2Engine {
    pub grid: RectilinearGrid1,
    pub time_steps: usize,
}

impl Bdf2Engine {
    pub fn new(grid: impl Into<RectilinearGrid1>, time_steps: usize) -> Self {
        Self {
            grid: grid.into(),
            time_steps,
        }
    }

    /// Solves backward from expiry and returns values on the whole grid.
    pub fn solve(
        &self,
        instrument: &VanillaOption,
        market: &Market,
    ) -> Result<GridSolution, PricingError> {
        instrument.validate()?;

        if self.time_steps == 0 {
            return Err(PricingError::InvalidInput(
                "time_steps must be > 0".to_string(),
            ));
        }
        let axis = self.grid.axis();
        if axis.size() < 3 {
            return Err(PricingError::InvalidInput(
                "grid must have at least 3 ticks".to_string(),
            ));
        }
        if !axis.is_strictly_increasing() || !axis.iter().all(|s| s.is_finite()) {
            return Err(PricingError::InvalidInput(
                "grid ticks must be finite and strictly increasing".to_string(),
            ));
        }
        if axis.lower() < 0.0 {
            return Err(PricingError::InvalidInput(
                "grid must not extend below zero spot".to_string(),
            ));
        }
        if !market.vol.is_finite() || market.vol <= 0.0 {
            return Err(PricingError::InvalidInput(
                "market volatility must be finite and > 0".to_string(),
            ));
        }

        let grid = axis.ticks();
        let n = grid.len();
        let payoff: Vec<f64> = grid.iter().map(|&s| instrument.payoff(s)).collect();

        if instrument.expiry == 0.0 {
            return Ok(GridSolution {
                axis: axis.clone(),
                values: payoff,
            });
        }

        let n_t = self.time_steps;
        let dt = instrument.expiry / n_t as f64;
        let s_max = axis.upper();
        let is_american = matches!(instrument.exercise, ExerciseStyle::American);
        let flags = match &instrument.exercise {
            ExerciseStyle::European => exercise_steps(&[], instrument.expiry, n_t),
            ExerciseStyle::American => vec![true; n_t + 1],
            ExerciseStyle::Bermudan { dates } => exercise_steps(dates, instrument.expiry, n_t),
        };

        let (a, b, c) =
            build_operator_coefficients(grid, market.rate, market.dividend_yield, market.vol);

        // Pre-allocate all scratch buffers once to eliminate per-timestep allocations.
        let mut lower = vec![0.0_f64; n];
        let mut diag = vec![0.0_f64; n];
        let mut upper = vec![0.0_f64; n];
        let mut rhs = vec![0.0_f64; n];
        let mut c_star = vec![0.0_f64; n];
        let mut d_star = vec![0.0_f64; n];

        let mut older = vec![0.0_f64; n];
        let mut values = payoff.clone();
        let mut next = vec![0.0_f64; n];
        let mut has_history = false;
        let mut events = 0_usize;

        for step in (0..n_t).rev() {
            let tau = instrument.expiry - step as f64 * dt;
            let leading = if has_history { 1.5 } else { 1.0 };

            for i in 0..n - 1 {
                lower[i] = -dt * a[i];
                diag[i] = leading - dt * b[i];
                upper[i] = -dt * c[i];
                rhs[i] = if has_history {
                    2.0f64.mul_add(values[i], -0.5 * older[i])
                } else {
                    values[i]
                };
            }
            lower[n - 1] = 0.0;
            diag[n - 1] = 1.0;
            upper[n - 1] = 0.0;
            rhs[n - 1] = upper_boundary(
                instrument.option_type,
                is_american,
                instrument.strike,
                market.rate,
                market.dividend_yield,
                s_max,
                tau,
            );

            solve_tridiagonal_inplace(
                &lower,
                &diag,
                &upper,
                &rhs,
                &mut c_star,
                &mut d_star,
                &mut next,
            )?;

            if flags[step] {
                for (v, &p) in next.iter_mut().zip(&payoff) {
                    *v = v.max(p);
                }
                events += 1;
                has_history = false;
                if !is_american {
                    debug!(step, time = step as f64 * dt, "applied exercise event");
                }
            } else {
                has_history = true;
            }

            std::mem::swap(&mut older, &mut values);
            std::mem::swap(&mut values, &mut next);
        }

        if values.iter().any(|v| !v.is_finite()) {
            return Err(PricingError::NumericalError(
                "non-finite option value on grid".to_string(),
            ));
        }

        debug!(
            nodes = n,
            time_steps = n_t,
            exercise_events = events,
            "bdf2 solve complete"
        );

        Ok(GridSolution {
            axis: axis.clone(),
            values,
        })
    }
}

impl PricingEngine<VanillaOption> for Bdf2Engine {
    fn price(
        &self,
        instrument: &VanillaOption,
        market: &Market,
    ) -> Result<PricingResult, PricingError> {
        let solution = self.solve(instrument, market)?;
        let price = solution.value_at(market.spot);

        let exercise_dates = match &instrument.exercise {
            ExerciseStyle::Bermudan { dates } => dates.len(),
            _ => 0,
        };

        let mut diagnostics = Diagnostics::new();
        diagnostics.insert_key(DiagKey::NumTimeSteps, self.time_steps as f64);
        diagnostics.insert_key(DiagKey::NumSpaceSteps, self.grid.size() as f64);
        diagnostics.insert_key(DiagKey::SMax, self.grid.axis().upper());
        diagnostics.insert_key(DiagKey::Vol, market.vol);
        diagnostics.insert_key(DiagKey::ExerciseDates, exercise_dates as f64);

        Ok(PricingResult { price, diagnostics })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis;
    use crate::grid::NewTickBetweenEachPair;

    fn market() -> Market {
        Market::builder()
            .spot(100.0)
            .rate(0.04)
            .dividend_yield(0.0)
            .flat_vol(0.20)
            .build()
            .unwrap()
    }

    fn grid() -> RectilinearGrid1 {
        RectilinearGrid1::new(axis![
            0.0, 20.0, 40.0, 60.0, 70.0, 80.0, 85.0, 90.0, 95.0, 100.0, 105.0, 110.0, 120.0,
            140.0, 170.0, 220.0, 300.0, 500.0, 1_000.0
        ])
        .refined(&NewTickBetweenEachPair, 2)
    }

    #[test]
    fn zero_expiry_returns_payoff() {
        let engine = Bdf2Engine::new(grid(), 10);
        let solution = engine
            .solve(&VanillaOption::european_put(100.0, 0.0), &market())
            .unwrap();
        assert_eq!(solution.value_at(80.0), 20.0);
        assert_eq!(solution.value_at(120.0), 0.0);
    }

    #[test]
    fn rejects_degenerate_configuration() {
        let option = VanillaOption::european_put(100.0, 1.0);
        let coarse = Bdf2Engine::new(axis![0.0, 100.0], 10);
        assert!(matches!(
            coarse.solve(&option, &market()),
            Err(PricingError::InvalidInput(_))
        ));
        let no_steps = Bdf2Engine::new(grid(), 0);
        assert!(no_steps.solve(&option, &market()).is_err());
        let negative = Bdf2Engine::new(axis![-10.0, 0.0, 100.0], 10);
        assert!(negative.solve(&option, &market()).is_err());
    }

    #[test]
    fn rejects_grid_edited_out_of_order() {
        let mut axis = grid().into_axis();
        axis[3] = axis[2];
        let engine = Bdf2Engine::new(axis, 10);
        assert!(
            engine
                .solve(&VanillaOption::european_put(100.0, 1.0), &market())
                .is_err()
        );
    }

    #[test]
    fn european_put_lower_boundary_discounts_strike() {
        let engine = Bdf2Engine::new(grid(), 50);
        let solution = engine
            .solve(&VanillaOption::european_put(100.0, 1.0), &market())
            .unwrap();
        let expected = 100.0 * (-0.04_f64).exp();
        assert!((solution.values()[0] - expected).abs() < 1.0e-2);
    }

    #[test]
    fn bermudan_dominates_european_and_intrinsic() {
        let engine = Bdf2Engine::new(grid(), 50);
        let m = market();
        let european = engine
            .solve(&VanillaOption::european_put(100.0, 1.0), &m)
            .unwrap();
        let bermudan = engine
            .solve(&VanillaOption::bermudan_put(100.0, 1.0, 10), &m)
            .unwrap();

        for ((&s, &b), &e) in bermudan
            .axis()
            .iter()
            .zip(bermudan.values())
            .zip(european.values())
        {
            assert!(b >= (100.0 - s).max(0.0) - 1.0e-12, "below intrinsic at {s}");
            assert!(b >= e - 1.0e-4, "below european at {s}");
        }
        assert!(bermudan.value_at(100.0) > european.value_at(100.0));
    }

    #[test]
    fn american_put_exercises_on_every_step() {
        let engine = Bdf2Engine::new(grid(), 50);
        let m = market();
        let american = engine
            .solve(&VanillaOption::american_put(100.0, 1.0), &m)
            .unwrap();
        let bermudan = engine
            .solve(&VanillaOption::bermudan_put(100.0, 1.0, 10), &m)
            .unwrap();

        for (&s, &v) in american.axis().iter().zip(american.values()) {
            assert!(v >= (100.0 - s).max(0.0) - 1.0e-12, "below intrinsic at {s}");
        }
        // Deep in the money the early-exercise boundary pins the value.
        assert_eq!(american.value_at(40.0), 60.0);
        assert!(american.value_at(100.0) + 0.02 >= bermudan.value_at(100.0));
    }

    #[test]
    fn price_reports_diagnostics() {
        let engine = Bdf2Engine::new(grid(), 25);
        let result = engine
            .price(&VanillaOption::bermudan_put(100.0, 1.0, 10), &market())
            .unwrap();
        assert!(result.price > 5.0 && result.price < 7.5);
        assert_eq!(result.diagnostics.get("num_time_steps"), Some(25.0));
        assert_eq!(
            result.diagnostics.get("num_space_steps"),
            Some(engine.grid.size() as f64)
        );
        assert_eq!(result.diagnostics.get("exercise_dates"), Some(10.0));
        assert_eq!(result.diagnostics.get("s_max"), Some(1_000.0));
    }

    #[test]
    fn image_samples_solution_on_another_axis() {
        let engine = Bdf2Engine::new(grid(), 25);
        let solution = engine
            .solve(&VanillaOption::european_put(100.0, 1.0), &market())
            .unwrap();
        let print_axis = Axis::range(0.0, 10.0, 200.0).unwrap();
        let image = solution.image(&print_axis);
        assert_eq!(image.len(), print_axis.size());
        // Put values fall as spot rises.
        assert!(image.windows(2).all(|w| w[1] <= w[0] + 1.0e-6));
    }
}
