//! Finite-difference PDE pricing engines.

pub mod bdf2;
mod fd_common;

pub use bdf2::{Bdf2Engine, GridSolution};
