use crate::core::{OptionType, PricingError};

/// Marks the backward steps (indexed by forward time `n * dt`) on which the
/// holder may exercise. Dates snap to the nearest step; expiry is always set.
pub(super) fn exercise_steps(dates: &[f64], expiry: f64, steps: usize) -> Vec<bool> {
    let mut flags = vec![false; steps + 1];
    for &t in dates {
        if expiry <= 0.0 {
            continue;
        }
        let idx = ((t / expiry) * steps as f64).round() as usize;
        flags[idx.min(steps)] = true;
    }
    flags[steps] = true;
    flags
}

/// Far-field Dirichlet value at the top of the spot grid, `tau` years before expiry.
pub(super) fn upper_boundary(
    option_type: OptionType,
    is_american: bool,
    strike: f64,
    rate: f64,
    dividend_yield: f64,
    s_max: f64,
    tau: f64,
) -> f64 {
    match (option_type, is_american) {
        (OptionType::Call, false) => {
            (s_max * (-dividend_yield * tau).exp() - strike * (-rate * tau).exp()).max(0.0)
        }
        (OptionType::Call, true) => (s_max - strike).max(0.0),
        (OptionType::Put, _) => 0.0,
    }
}

/// Tridiagonal Black-Scholes operator `0.5 s^2 S^2 V_SS + (r - q) S V_S - r V`
/// on a non-uniform grid, returned as `(sub, diag, super)` coefficients.
///
/// Drift uses central differences unless that would make an off-diagonal
/// negative, in which case it falls back to the upwind one-sided difference.
/// Row 0 carries only the reaction term and outward drift; the last row is
/// left zero for the caller's boundary condition.
pub(super) fn build_operator_coefficients(
    grid: &[f64],
    rate: f64,
    dividend_yield: f64,
    vol: f64,
) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let n_s = grid.len() - 1;
    let mut a = vec![0.0_f64; n_s + 1];
    let mut b = vec![0.0_f64; n_s + 1];
    let mut c = vec![0.0_f64; n_s + 1];

    let drift0 = (rate - dividend_yield) * grid[0];
    if drift0 > 0.0 {
        c[0] = drift0 / (grid[1] - grid[0]);
    }
    b[0] = -c[0] - rate;

    for i in 1..n_s {
        let s = grid[i];
        let h_m = grid[i] - grid[i - 1];
        let h_p = grid[i + 1] - grid[i];

        let diffusion = 0.5 * vol * vol * s * s;
        let drift = (rate - dividend_yield) * s;

        let diff_m = 2.0 * diffusion / (h_m * (h_m + h_p));
        let diff_p = 2.0 * diffusion / (h_p * (h_m + h_p));

        let mut lower = diff_m - drift * h_p / (h_m * (h_m + h_p));
        let mut upper = diff_p + drift * h_m / (h_p * (h_m + h_p));
        if lower < 0.0 || upper < 0.0 {
            if drift > 0.0 {
                lower = diff_m;
                upper = diff_p + drift / h_p;
            } else {
                lower = diff_m - drift / h_m;
                upper = diff_p;
            }
        }

        a[i] = lower;
        b[i] = -(lower + upper) - rate;
        c[i] = upper;
    }

    (a, b, c)
}

pub(super) fn interpolate_on_grid(spot: f64, grid: &[f64], values: &[f64]) -> f64 {
    debug_assert_eq!(grid.len(), values.len());

    if spot <= grid[0] {
        return values[0];
    }
    let n = grid.len() - 1;
    if spot >= grid[n] {
        return values[n];
    }

    let hi = grid.partition_point(|&x| x < spot).clamp(1, n);
    let lo = hi - 1;
    let w = (spot - grid[lo]) / (grid[hi] - grid[lo]);
    (1.0 - w) * values[lo] + w * values[hi]
}

pub(super) fn solve_tridiagonal_inplace(
    lower: &[f64],
    diag: &[f64],
    upper: &[f64],
    rhs: &[f64],
    c_star: &mut [f64],
    d_star: &mut [f64],
    out: &mut [f64],
) -> Result<(), PricingError> {
    let n = diag.len();
    if n == 0 {
        return Ok(());
    }
    if lower.len() != n
        || upper.len() != n
        || rhs.len() != n
        || c_star.len() != n
        || d_star.len() != n
        || out.len() != n
    {
        return Err(PricingError::InvalidInput(
            "tridiagonal input lengths must match".to_string(),
        ));
    }

    if diag[0].abs() <= 1.0e-14 {
        return Err(PricingError::NumericalError(
            "tridiagonal solver singular matrix".to_string(),
        ));
    }

    c_star[0] = if n > 1 { upper[0] / diag[0] } else { 0.0 };
    d_star[0] = rhs[0] / diag[0];

    for i in 1..n {
        let denom = (-lower[i]).mul_add(c_star[i - 1], diag[i]);
        if denom.abs() <= 1.0e-14 {
            return Err(PricingError::NumericalError(
                "tridiagonal solver singular matrix".to_string(),
            ));
        }
        c_star[i] = if i < n - 1 { upper[i] / denom } else { 0.0 };
        d_star[i] = (-lower[i]).mul_add(d_star[i - 1], rhs[i]) / denom;
    }

    out[n - 1] = d_star[n - 1];
    for i in (0..n - 1).rev() {
        out[i] = (-c_star[i]).mul_add(out[i + 1], d_star[i]);
    }
    Ok(())
}
