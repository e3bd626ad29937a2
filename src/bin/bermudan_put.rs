//! Command-line entry point pricing a Bermudan put on the refined base grid.
//!
//! Usage: `bermudan_put [CONFIG.json]`. Without a path the built-in defaults are
//! used; set `RUST_LOG=debug` to trace exercise events.

use std::io::Write;

use anyhow::Context;
use quantpde::config::BermudanPutConfig;
use quantpde::engines::pde::{Bdf2Engine, GridSolution};
use quantpde::grid::Axis;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn load_config() -> anyhow::Result<BermudanPutConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let payload = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config file {path}"))?;
            BermudanPutConfig::from_json_str(&payload)
                .with_context(|| format!("parsing config file {path}"))
        }
        None => Ok(BermudanPutConfig::default()),
    }
}

/// Writes the solution image, one `spot\tvalue` line per tick of
/// `print_axis`, followed by the price at `spot`.
fn write_report(
    out: &mut impl Write,
    solution: &GridSolution,
    print_axis: &Axis,
    spot: f64,
) -> std::io::Result<f64> {
    for (s, value) in print_axis.iter().zip(solution.image(print_axis)) {
        writeln!(out, "{s}\t{value:.6}")?;
    }
    let price = solution.value_at(spot);
    writeln!(out, "price at spot {spot}: {price:.6}")?;
    Ok(price)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config()?;
    let grid = config.grid();
    info!(
        nodes = grid.size(),
        refinement = config.refinement,
        time_steps = config.time_steps,
        exercises = config.exercises,
        "pricing bermudan put"
    );

    let engine = Bdf2Engine::new(grid, config.time_steps);
    let instrument = config.instrument();
    let market = config.market()?;

    let solution = engine.solve(&instrument, &market)?;
    let print_axis = Axis::range(0.0, 10.0, 200.0)?;
    let price = write_report(&mut std::io::stdout().lock(), &solution, &print_axis, market.spot)
        .context("writing report")?;
    info!(spot = market.spot, price, "done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_ends_with_price_at_spot() {
        let config = BermudanPutConfig::default();
        let solution = Bdf2Engine::new(config.grid(), config.time_steps)
            .solve(&config.instrument(), &config.market().unwrap())
            .unwrap();
        let print_axis = Axis::range(0.0, 10.0, 200.0).unwrap();

        let mut out = Vec::new();
        let price = write_report(&mut out, &solution, &print_axis, config.spot).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), print_axis.size() + 1);
        assert_eq!(lines[0], format!("0\t{:.6}", solution.value_at(0.0)));
        assert_eq!(
            lines[lines.len() - 1],
            format!("price at spot 100: {price:.6}")
        );
        assert_eq!(price, solution.value_at(config.spot));
    }
}
