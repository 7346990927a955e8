//! Points-per-axis sampling density.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{VinoError, VinoResult};

/// Sampling density for gridded representations: either one value applied to
/// every axis, or one value per axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ppa {
    Scalar(u32),
    PerAxis(Vec<u32>),
}

impl Ppa {
    /// Check this density against a dataset dimensionality.
    ///
    /// A scalar is valid for any dimensionality; a per-axis sequence must
    /// supply exactly one value per axis. Zero values are rejected at parse
    /// time, so every stored value is positive.
    pub fn validate(&self, dim: usize) -> VinoResult<()> {
        match self {
            Ppa::Scalar(_) => Ok(()),
            Ppa::PerAxis(values) if values.len() == dim => Ok(()),
            Ppa::PerAxis(values) => Err(VinoError::PpaCardinality {
                expected: dim,
                got: values.len(),
            }),
        }
    }

    /// Expand to one value per axis, replicating a scalar.
    pub fn per_axis(&self, dim: usize) -> Vec<u32> {
        match self {
            Ppa::Scalar(value) => vec![*value; dim],
            Ppa::PerAxis(values) => values.clone(),
        }
    }

    /// Density along one axis. Out-of-range axes fall back to the first
    /// value, matching a scalar density.
    pub fn axis(&self, axis: usize) -> u32 {
        match self {
            Ppa::Scalar(value) => *value,
            Ppa::PerAxis(values) => values.get(axis).copied().unwrap_or(values[0]),
        }
    }
}

impl fmt::Display for Ppa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ppa::Scalar(value) => write!(f, "{}", value),
            Ppa::PerAxis(values) => {
                let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                f.write_str(&parts.join(","))
            }
        }
    }
}

impl FromStr for Ppa {
    type Err = VinoError;

    /// Parse form text: a single integer parses as a scalar, a comma list
    /// parses per-axis, and a one-element list collapses to a scalar.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|v| *v > 0)
                    .ok_or_else(|| VinoError::InvalidPpa(s.to_string()))
            })
            .collect::<VinoResult<Vec<u32>>>()?;

        match values.as_slice() {
            [] => Err(VinoError::InvalidPpa(s.to_string())),
            [single] => Ok(Ppa::Scalar(*single)),
            _ => Ok(Ppa::PerAxis(values)),
        }
    }
}

impl From<u32> for Ppa {
    fn from(value: u32) -> Self {
        Ppa::Scalar(value)
    }
}
