//! Physical constants of a run.
//!
//! Every field has a default, so a configuration file only needs to name the
//! constants it changes:
//!
//! ```toml
//! [force]
//! linear_drag = 0.0
//! quadratic_drag = 0.0
//!
//! [annihilation]
//! radius = 0.5
//! ```

use serde::{Deserialize, Serialize};

use crate::{Annihilation, DefectForce, Result};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsParams {
    pub force: DefectForce,
    pub annihilation: Annihilation,
}

impl PhysicsParams {
    pub fn validate(&self) -> Result<()> {
        self.force.validate()?;
        self.annihilation.validate()
    }
}
