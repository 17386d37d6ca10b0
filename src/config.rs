//! Accumulation configuration
//!
//! The only tunable of the engine is the number of lanes the vectorized
//! driver accumulates in parallel. The width is fixed at compile time inside
//! each driver instantiation; the configuration picks one of the
//! instantiations once per call.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::simd::Scalar;

/// Environment variable consulted by [`AccumulateConfig::from_env`]
pub const LANE_WIDTH_ENV: &str = "VSTAT_LANE_WIDTH";

/// Number of lanes of a vector accumulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum LaneWidth {
    X2,
    X4,
    X8,
    X16,
}

impl LaneWidth {
    /// Lane count as a number
    pub fn lanes(self) -> usize {
        match self {
            LaneWidth::X2 => 2,
            LaneWidth::X4 => 4,
            LaneWidth::X8 => 8,
            LaneWidth::X16 => 16,
        }
    }
}

impl TryFrom<usize> for LaneWidth {
    type Error = Error;

    fn try_from(lanes: usize) -> Result<Self> {
        match lanes {
            2 => Ok(LaneWidth::X2),
            4 => Ok(LaneWidth::X4),
            8 => Ok(LaneWidth::X8),
            16 => Ok(LaneWidth::X16),
            other => Err(Error::InvalidLaneWidth(other)),
        }
    }
}

impl From<LaneWidth> for usize {
    fn from(width: LaneWidth) -> usize {
        width.lanes()
    }
}

/// Configuration for the vectorized accumulation driver
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccumulateConfig {
    /// Lane count, `None` for the native width of the scalar type
    pub lane_width: Option<LaneWidth>,
}

impl AccumulateConfig {
    /// Create a configuration using native widths
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the lane width
    pub fn with_lane_width(mut self, lane_width: LaneWidth) -> Self {
        self.lane_width = Some(lane_width);
        self
    }

    /// Lane width used when accumulating values of type `T`
    pub fn lane_width_for<T: Scalar>(&self) -> LaneWidth {
        self.lane_width.unwrap_or(T::NATIVE_WIDTH)
    }

    /// Parse a configuration from TOML, e.g. `lane_width = 8`
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: AccumulateConfig = toml::from_str(input)?;
        log::debug!("loaded accumulate config from toml: {:?}", config);
        Ok(config)
    }

    /// Parse a configuration from JSON, e.g. `{"lane_width": 8}`
    pub fn from_json_str(input: &str) -> Result<Self> {
        let config: AccumulateConfig = serde_json::from_str(input)?;
        log::debug!("loaded accumulate config from json: {:?}", config);
        Ok(config)
    }

    /// Read the lane width from `VSTAT_LANE_WIDTH`.
    ///
    /// An unset variable yields the default configuration. A value that is not
    /// a supported width is logged and ignored.
    pub fn from_env() -> Self {
        let lane_width = match std::env::var(LANE_WIDTH_ENV) {
            Ok(raw) => match parse_lane_width(&raw) {
                Ok(width) => Some(width),
                Err(err) => {
                    log::warn!("ignoring {}={:?}: {}", LANE_WIDTH_ENV, raw, err);
                    None
                }
            },
            Err(_) => None,
        };
        Self { lane_width }
    }
}

fn parse_lane_width(raw: &str) -> Result<LaneWidth> {
    let lanes = raw
        .trim()
        .parse::<usize>()
        .map_err(|e| Error::Config(e.to_string()))?;
    LaneWidth::try_from(lanes)
}
