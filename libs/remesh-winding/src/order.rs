//! # Expansion Order
//!
//! Number of multipole terms kept for far-field clusters.

use std::fmt;

use config::constants::DEFAULT_WINDING_ORDER;
use serde::{Deserialize, Serialize};

use crate::error::WindingError;

/// Multipole expansion order of the winding-number tree.
///
/// # Examples
/// ```
/// use remesh_winding::ExpansionOrder;
/// assert_eq!(ExpansionOrder::try_from(1).unwrap(), ExpansionOrder::First);
/// assert!(ExpansionOrder::try_from(3).is_err());
/// assert_eq!(ExpansionOrder::default().as_u32(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum ExpansionOrder {
    /// Dipole term only.
    Dipole,
    /// Dipole plus the first-order (Hessian) correction.
    First,
    /// Dipole, first- and second-order corrections.
    Second,
}

impl ExpansionOrder {
    /// Numeric order, 0 to 2.
    pub fn as_u32(self) -> u32 {
        match self {
            ExpansionOrder::Dipole => 0,
            ExpansionOrder::First => 1,
            ExpansionOrder::Second => 2,
        }
    }
}

impl Default for ExpansionOrder {
    fn default() -> Self {
        match DEFAULT_WINDING_ORDER {
            0 => ExpansionOrder::Dipole,
            1 => ExpansionOrder::First,
            _ => ExpansionOrder::Second,
        }
    }
}

impl TryFrom<u32> for ExpansionOrder {
    type Error = WindingError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ExpansionOrder::Dipole),
            1 => Ok(ExpansionOrder::First),
            2 => Ok(ExpansionOrder::Second),
            other => Err(WindingError::InvalidOrder(other)),
        }
    }
}

impl From<ExpansionOrder> for u32 {
    fn from(order: ExpansionOrder) -> Self {
        order.as_u32()
    }
}

impl fmt::Display for ExpansionOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u32())
    }
}
