use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use super::Force;
use crate::{
    kinematics::{difference, magnitude},
    Charge, Error, Result,
};

/// Coulomb interaction between defects with a hard cutoff, plus linear and
/// quadratic drag on the charge the force acts on.
///
/// The drag is added on every pairwise evaluation, so a charge with `n - 1`
/// partners feels it `n - 1` times per step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefectForce {
    /// Electric force constant `k`.
    pub force_constant: f64,
    /// Linear drag coefficient `b`.
    pub linear_drag: f64,
    /// Quadratic drag coefficient `c`.
    pub quadratic_drag: f64,
    /// No electrostatic force at or beyond this distance.
    pub cutoff_radius: f64,
    /// Separations below this are clamped to it before the inverse cube.
    ///
    /// With `0` two coincident charges are an error instead.
    pub min_separation: f64,
}

impl Default for DefectForce {
    fn default() -> Self {
        Self {
            force_constant: 9e9,
            linear_drag: 1e-1,
            quadratic_drag: 1e-5,
            cutoff_radius: 100.,
            min_separation: 1e-9,
        }
    }
}

impl DefectForce {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn drag(mut self, linear: f64, quadratic: f64) -> Self {
        self.linear_drag = linear;
        self.quadratic_drag = quadratic;
        self
    }

    #[must_use]
    pub fn cutoff(mut self, radius: f64) -> Self {
        self.cutoff_radius = radius;
        self
    }

    #[must_use]
    pub fn min_separation(mut self, min_separation: f64) -> Self {
        self.min_separation = min_separation;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.force_constant.is_finite() {
            return Err(Error::InvalidParam("force constant must be finite".into()));
        }
        if !(self.linear_drag.is_finite() && self.linear_drag >= 0.)
            || !(self.quadratic_drag.is_finite() && self.quadratic_drag >= 0.)
        {
            return Err(Error::InvalidParam(
                "drag coefficients must be finite and >= 0".into(),
            ));
        }
        if self.cutoff_radius.is_nan() || self.cutoff_radius <= 0. {
            return Err(Error::InvalidParam("cutoff radius must be > 0".into()));
        }
        if !(self.min_separation.is_finite() && self.min_separation >= 0.) {
            return Err(Error::InvalidParam(
                "minimum separation must be finite and >= 0".into(),
            ));
        }
        Ok(())
    }

    /// The electrostatic part of [`Force::eval`].
    pub fn electrostatic(&self, charge: &Charge, other: &Charge) -> Result<Vector2<f64>> {
        let r = difference(other.position(), charge.position());
        let d = magnitude(&r);

        if d >= self.cutoff_radius {
            return Ok(Vector2::zeros());
        }
        if d == 0. && self.min_separation == 0. {
            return Err(Error::DegenerateSeparation(charge.id(), other.id()));
        }

        let d = d.max(self.min_separation);
        Ok(-self.force_constant * charge.sign().value() * other.sign().value() * r / d.powi(3))
    }

    /// The drag part of [`Force::eval`].
    #[must_use]
    pub fn drag_on(&self, charge: &Charge) -> Vector2<f64> {
        let v = *charge.velocity();
        -self.linear_drag * v - self.quadratic_drag * magnitude(&v) * v
    }
}

impl Force for DefectForce {
    fn eval(&self, charge: &Charge, other: &Charge) -> Result<Vector2<f64>> {
        Ok(self.electrostatic(charge, other)? + self.drag_on(charge))
    }

    fn validate(&self) -> Result<()> {
        DefectForce::validate(self)
    }
}
