//! Receiver geometry: where pressure and arrivals are evaluated.

use crate::ConfigError;

/// Receiver geometry for one run.
///
/// Grids are validated at construction; downstream code indexes them
/// without further checks. The flattened point order is row-major over
/// `(range, depth)` for rectangular grids.
#[derive(Clone, Debug, PartialEq)]
pub enum ReceiverGrid {
    /// Full rectangular grid: every range paired with every depth.
    Rectangular {
        /// Strictly increasing receiver ranges in meters.
        ranges: Vec<f64>,
        /// Strictly increasing receiver depths in meters.
        depths: Vec<f64>,
    },
    /// A horizontal line of receivers at one depth.
    Horizontal {
        /// Strictly increasing receiver ranges in meters.
        ranges: Vec<f64>,
        /// Common receiver depth in meters.
        depth: f64,
    },
    /// A vertical line of receivers at one range.
    Vertical {
        /// Common receiver range in meters.
        range: f64,
        /// Strictly increasing receiver depths in meters.
        depths: Vec<f64>,
    },
    /// Paired coordinates, one receiver per `(range, depth)` pair.
    Linear {
        /// Receiver ranges in meters, one per receiver.
        ranges: Vec<f64>,
        /// Receiver depths in meters, one per receiver.
        depths: Vec<f64>,
    },
}

fn check_axis(xs: &[f64], axis: &'static str) -> Result<(), ConfigError> {
    if xs.is_empty() {
        return Err(ConfigError::EmptyAxis { axis });
    }
    if xs.windows(2).any(|w| w[1] <= w[0]) {
        return Err(ConfigError::UnsortedAxis { axis });
    }
    Ok(())
}

impl ReceiverGrid {
    /// Build a rectangular grid.
    pub fn rectangular(ranges: Vec<f64>, depths: Vec<f64>) -> Result<Self, ConfigError> {
        check_axis(&ranges, "range")?;
        check_axis(&depths, "depth")?;
        Ok(Self::Rectangular { ranges, depths })
    }

    /// Build a horizontal array at one depth.
    pub fn horizontal(ranges: Vec<f64>, depth: f64) -> Result<Self, ConfigError> {
        check_axis(&ranges, "range")?;
        Ok(Self::Horizontal { ranges, depth })
    }

    /// Build a vertical array at one range.
    pub fn vertical(range: f64, depths: Vec<f64>) -> Result<Self, ConfigError> {
        check_axis(&depths, "depth")?;
        Ok(Self::Vertical { range, depths })
    }

    /// Build a linear array from paired coordinates.
    ///
    /// Pairs need not be sorted; cardinalities must match.
    pub fn linear(ranges: Vec<f64>, depths: Vec<f64>) -> Result<Self, ConfigError> {
        if ranges.is_empty() {
            return Err(ConfigError::EmptyAxis { axis: "range" });
        }
        if ranges.len() != depths.len() {
            return Err(ConfigError::LinearArityMismatch {
                ranges: ranges.len(),
                depths: depths.len(),
            });
        }
        Ok(Self::Linear { ranges, depths })
    }

    /// Logical shape as `(n_ranges, n_depths)`; linear arrays are `(n, 1)`.
    pub fn shape(&self) -> (usize, usize) {
        match self {
            Self::Rectangular { ranges, depths } => (ranges.len(), depths.len()),
            Self::Horizontal { ranges, .. } => (ranges.len(), 1),
            Self::Vertical { depths, .. } => (1, depths.len()),
            Self::Linear { ranges, .. } => (ranges.len(), 1),
        }
    }

    /// Total number of receivers.
    pub fn len(&self) -> usize {
        let (nr, nz) = self.shape();
        nr * nz
    }

    /// Always `false`: constructors reject empty axes.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Flattened receiver coordinates in canonical order.
    ///
    /// Rectangular grids iterate range-major: all depths of the first
    /// range, then the second, matching the flattened pressure layout.
    pub fn points(&self) -> Vec<(f64, f64)> {
        match self {
            Self::Rectangular { ranges, depths } => {
                let mut out = Vec::with_capacity(ranges.len() * depths.len());
                for &r in ranges {
                    for &z in depths {
                        out.push((r, z));
                    }
                }
                out
            }
            Self::Horizontal { ranges, depth } => {
                ranges.iter().map(|&r| (r, *depth)).collect()
            }
            Self::Vertical { range, depths } => {
                depths.iter().map(|&z| (*range, z)).collect()
            }
            Self::Linear { ranges, depths } => {
                ranges.iter().cloned().zip(depths.iter().cloned()).collect()
            }
        }
    }

    /// The distinct receiver ranges of this geometry.
    pub fn ranges(&self) -> Vec<f64> {
        match self {
            Self::Rectangular { ranges, .. }
            | Self::Horizontal { ranges, .. }
            | Self::Linear { ranges, .. } => ranges.clone(),
            Self::Vertical { range, .. } => vec![*range],
        }
    }

    /// The distinct receiver depths of this geometry.
    pub fn depths(&self) -> Vec<f64> {
        match self {
            Self::Rectangular { depths, .. }
            | Self::Vertical { depths, .. }
            | Self::Linear { depths, .. } => depths.clone(),
            Self::Horizontal { depth, .. } => vec![*depth],
        }
    }
}
