//! Requested plot state and dirty checking.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{VinoError, VinoResult};
use crate::format::Format;
use crate::ppa::Ppa;

/// Identifier of a server-held dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VinoId(pub u32);

impl fmt::Display for VinoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The 2-axis cutting plane of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plane(pub usize, pub usize);

impl Plane {
    /// Axes of a `dim`-dimensional dataset that are not part of this plane,
    /// in ascending order. These are the axes a section fixes coordinates on.
    pub fn off_axes(&self, dim: usize) -> Vec<usize> {
        (0..dim).filter(|a| *a != self.0 && *a != self.1).collect()
    }

    /// Check that both axes exist and differ.
    pub fn validate(&self, dim: usize) -> VinoResult<()> {
        if self.0 == self.1 {
            return Err(VinoError::InvalidPlane(format!(
                "plane axes must differ, got {},{}",
                self.0, self.1
            )));
        }
        if self.0 >= dim || self.1 >= dim {
            return Err(VinoError::InvalidPlane(format!(
                "plane axes must be below {}, got {},{}",
                dim, self.0, self.1
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.0, self.1)
    }
}

/// Canonical snapshot of what the user is asking to plot.
///
/// Compared by structural equality against the last committed state to
/// decide whether a re-plot is warranted. Sequences compare order-sensitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestedState {
    pub id: VinoId,
    /// Conversion format; `None` requests the dataset's native format.
    pub format: Option<Format>,
    pub ppa: Ppa,
    /// Cross-section mode.
    pub section: bool,
    pub plane: Plane,
    /// Fixed coordinates on the off-plane axes while in section mode.
    pub at: Option<Vec<f64>>,
    /// Color points by distance field instead of position.
    pub distance: bool,
    /// Outline-shapes overlay.
    pub shapes: bool,
}

impl RequestedState {
    /// A plain full-data request with every mode flag off.
    pub fn new(id: VinoId, format: Option<Format>, ppa: Ppa) -> Self {
        Self {
            id,
            format,
            ppa,
            section: false,
            plane: Plane(0, 1),
            at: None,
            distance: false,
            shapes: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> RequestedState {
        RequestedState::new(VinoId(7), Some(Format::Bars), Ppa::Scalar(1000))
    }

    #[test]
    fn test_equal_states_are_equal() {
        assert_eq!(state(), state());
    }

    #[test]
    fn test_single_field_difference_detected() {
        let base = state();

        let mut other = state();
        other.ppa = Ppa::Scalar(999);
        assert_ne!(base, other);

        let mut other = state();
        other.shapes = true;
        assert_ne!(base, other);

        let mut other = state();
        other.at = Some(vec![2.0, 3.0]);
        assert_ne!(base, other);

        let mut other = state();
        other.format = None;
        assert_ne!(base, other);
    }

    #[test]
    fn test_at_order_sensitive() {
        let mut a = state();
        a.at = Some(vec![1.0, 2.0]);
        let mut b = state();
        b.at = Some(vec![2.0, 1.0]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_off_axes() {
        assert_eq!(Plane(0, 1).off_axes(5), vec![2, 3, 4]);
        assert_eq!(Plane(1, 3).off_axes(4), vec![0, 2]);
        assert!(Plane(0, 1).off_axes(2).is_empty());
    }

    #[test]
    fn test_plane_validation() {
        assert!(Plane(0, 1).validate(2).is_ok());
        assert!(Plane(1, 1).validate(3).is_err());
        assert!(Plane(0, 3).validate(3).is_err());
    }
}
