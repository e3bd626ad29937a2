//! quantpde is a finite-difference PDE engine for pricing options with early-exercise
//! features on refinable, non-uniform spot grids.
//!
//! The foundation is [`grid::Axis`]: a strictly increasing sequence of ticks partitioning
//! one spatial dimension. Grids, finite-difference stencils and interpolation all walk axis
//! ticks, and midpoint refinement densifies an axis while keeping every existing tick
//! bit-for-bit, so solutions computed on successive refinements stay comparable node by node.
//!
//! Numerical considerations:
//! - Axis ordering is checked on construction only in builds with `debug_assertions` or the
//!   `checked-axis` feature; optimized builds trust literal grids. Use `Axis::try_new` for
//!   untrusted input.
//! - The BDF2 engine restarts with an implicit Euler step after expiry and after each exercise
//!   event, and keeps the Black-Scholes operator an M-matrix by upwinding drift where needed.
//!
//! # Feature Flags
//! - `checked-axis`: validates axis ordering on construction in optimized builds too.
//!
//! # Quick Start
//! Build and refine an axis:
//! ```rust
//! use quantpde::axis;
//!
//! let axis = axis![0.0, 10.0, 20.0];
//! assert_eq!(axis.refine().to_string(), "(0 5 10 15 20)");
//! assert_eq!(axis.refine_times(2).size(), 9);
//! ```
//!
//! Price a Bermudan put:
//! ```rust
//! use quantpde::axis;
//! use quantpde::core::PricingEngine;
//! use quantpde::engines::pde::Bdf2Engine;
//! use quantpde::grid::{NewTickBetweenEachPair, RectilinearGrid1};
//! use quantpde::instruments::VanillaOption;
//! use quantpde::market::Market;
//!
//! let grid = RectilinearGrid1::new(axis![0.0, 50.0, 80.0, 90.0, 100.0, 110.0, 130.0, 200.0, 1_000.0])
//!     .refined(&NewTickBetweenEachPair, 3);
//! let market = Market::builder()
//!     .spot(100.0)
//!     .rate(0.04)
//!     .flat_vol(0.2)
//!     .build()
//!     .unwrap();
//! let put = VanillaOption::bermudan_put(100.0, 1.0, 10);
//!
//! let result = Bdf2Engine::new(grid, 50).price(&put, &market).unwrap();
//! assert!(result.price > 5.5 && result.price < 7.0);
//! ```

pub mod config;
pub mod core;
pub mod engines;
pub mod grid;
pub mod instruments;
pub mod market;

/// Common imports for ergonomic usage.
pub mod prelude {
    pub use crate::axis;
    pub use crate::config::BermudanPutConfig;
    pub use crate::core::*;
    pub use crate::engines::pde::{Bdf2Engine, GridSolution};
    pub use crate::grid::*;
    pub use crate::instruments::*;
    pub use crate::market::*;
}
