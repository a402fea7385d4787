use std::fmt;

use nalgebra::Vector2;

use crate::error::{Error, Result};

/// Stable identifier of a charge, independent of its index in the collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChargeId(pub u32);

impl fmt::Display for ChargeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Polarity of a defect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    /// `+1` or `-1`.
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Sign::Positive => 1.,
            Sign::Negative => -1.,
        }
    }

    #[must_use]
    pub fn is_opposite(self, other: Sign) -> bool {
        self != other
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sign::Positive => write!(f, "+"),
            Sign::Negative => write!(f, "-"),
        }
    }
}

/// A signed point charge moving in the plane.
///
/// Mass and sign are fixed at construction. Position and velocity are only
/// changed by the integrator.
#[derive(Clone, Debug, PartialEq)]
pub struct Charge {
    id: ChargeId,
    mass: f64,
    sign: Sign,
    position: Vector2<f64>,
    velocity: Vector2<f64>,
}

impl Charge {
    /// Create a charge at rest.
    ///
    /// # Errors
    /// - [`Error::NonPositiveMass`] if `mass` is not finite and positive.
    /// - [`Error::InvalidParam`] if `position` has a non-finite component.
    pub fn new(id: ChargeId, mass: f64, sign: Sign, position: Vector2<f64>) -> Result<Self> {
        if !mass.is_finite() || mass <= 0. {
            return Err(Error::NonPositiveMass(mass));
        }
        if !position.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam(format!(
                "position of charge {id} must be finite"
            )));
        }

        Ok(Self {
            id,
            mass,
            sign,
            position,
            velocity: Vector2::zeros(),
        })
    }

    /// Give the charge an initial velocity.
    pub fn with_velocity(mut self, velocity: Vector2<f64>) -> Result<Self> {
        if !velocity.iter().all(|x| x.is_finite()) {
            return Err(Error::InvalidParam(format!(
                "velocity of charge {} must be finite",
                self.id
            )));
        }
        self.velocity = velocity;
        Ok(self)
    }

    pub fn id(&self) -> ChargeId {
        self.id
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    pub fn position(&self) -> &Vector2<f64> {
        &self.position
    }

    pub(crate) fn position_mut(&mut self) -> &mut Vector2<f64> {
        &mut self.position
    }

    pub fn velocity(&self) -> &Vector2<f64> {
        &self.velocity
    }

    pub(crate) fn velocity_mut(&mut self) -> &mut Vector2<f64> {
        &mut self.velocity
    }
}

impl fmt::Display for Charge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, m = {}) at ({}, {}) moving ({}, {})",
            self.id,
            self.sign,
            self.mass,
            self.position.x,
            self.position.y,
            self.velocity.x,
            self.velocity.y
        )
    }
}
