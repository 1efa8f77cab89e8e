//! Core configuration types for the Pelagos acoustic ray tracer.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! run configuration (source, launch fan, receiver geometry), the unit
//! conventions applied at the engine boundary, and the configuration
//! error type.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod error;
mod receiver;
mod source;
pub mod units;

pub use error::ConfigError;
pub use receiver::ReceiverGrid;
pub use source::{RangeBox, Source};
