pub mod defect;

use std::fmt::Debug;

use nalgebra::Vector2;

use crate::{Charge, Result};

pub use defect::DefectForce;

/// A general pairwise force.
pub trait Force: Clone + Debug + Send + Sync {
    /// Calculate the force on `charge` due to `other`.
    ///
    /// Any term that only depends on `charge` itself (such as drag) is part of
    /// the returned value as well, so it is counted once per partner.
    fn eval(&self, charge: &Charge, other: &Charge) -> Result<Vector2<f64>>;

    /// Check the parameters of the force before it is used in a simulation.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}
