//! Pricing engine implementations.

pub mod pde;
