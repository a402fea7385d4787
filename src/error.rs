use thiserror::Error;

use crate::ChargeId;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while building or advancing a charge collection.
#[derive(Debug, Error)]
pub enum Error {
    /// A charge was constructed with a mass that is not finite and positive.
    #[error("mass must be finite and > 0, got {0}")]
    NonPositiveMass(f64),

    /// Two charges sit at exactly the same position and the force model has no
    /// minimum separation to fall back on.
    #[error("charges {0} and {1} coincide, the electrostatic force is undefined")]
    DegenerateSeparation(ChargeId, ChargeId),

    /// The summed force on a charge overflowed or became NaN.
    #[error("acceleration of charge {0} is not finite")]
    NonFiniteAcceleration(ChargeId),

    /// A position or velocity left the finite range during a step.
    #[error("state of charge {0} is not finite after the step")]
    NonFiniteState(ChargeId),

    #[error("time step must be finite and > 0, got {0}")]
    InvalidTimeStep(f64),

    /// Invalid user or API parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "render")]
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_informative() {
        let e = Error::DegenerateSeparation(ChargeId(3), ChargeId(7));
        let msg = e.to_string();
        assert!(msg.contains('3'));
        assert!(msg.contains('7'));

        let e = Error::NonPositiveMass(-1.);
        assert!(e.to_string().contains("mass"));
    }
}
