//! Eigenray search and coherent field synthesis for Pelagos.
//!
//! Consumes completed rays from `pelagos-trace` and produces the run's
//! output product: eigenray/arrival collections, the coherent pressure
//! grid, transmission loss, or particle velocity. Rays are traced in
//! launch-angle order and folded into the output one at a time, so a
//! run's memory stays bounded by one trajectory plus the output grids.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod arrivals;
mod eigenray;
mod error;
mod pressure;
mod products;
mod sample;
mod velocity;

pub use arrivals::{Arrival, ArrivalSet};
pub use eigenray::{
    proximity_search, regula_falsi_search, SearchConfig, MAX_REGULA_ITERS,
};
pub use error::SearchError;
pub use pressure::{coherent_pressure, transmission_loss, PressureGrid};
pub use products::{
    run, EigenrayPath, EigenraySolver, Output, OutputKind, RayInfo, RunSummary,
};
pub use velocity::{particle_velocity, VelocityField};
