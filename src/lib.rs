pub mod annihilation;
pub mod charge;
#[cfg(feature = "randomization")]
pub mod creator;
pub mod error;
pub mod integrator;
pub mod interaction;
pub mod kinematics;
pub mod output;
pub mod params;

pub use annihilation::{annihilate, Annihilation};
pub use charge::{Charge, ChargeId, Sign};
pub use error::{Error, Result};
pub use integrator::{num_steps, step, step_with};
pub use interaction::{DefectForce, Force};
pub use params::PhysicsParams;

/// How the pairwise force sum of a step is executed.
///
/// Annihilation and the position update always run on the calling thread.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Execution {
    #[default]
    SingleThreaded,
    /// Split the charges into `num_threads` chunks, each summed on its own scoped thread.
    Multithreaded { num_threads: usize },
    #[cfg(feature = "rayon")]
    RayonIter,
}

/// A population of defects together with the rules that evolve it.
#[derive(Clone, Debug)]
pub struct Simulation<F: Force = DefectForce> {
    charges: Vec<Charge>,
    force: F,
    annihilation: Annihilation,
    execution: Execution,
    steps: usize,
    annihilated: usize,
}

impl Simulation<DefectForce> {
    pub fn from_params(charges: Vec<Charge>, params: PhysicsParams) -> Result<Self> {
        Self::new(charges, params.force, params.annihilation)
    }
}

impl<F: Force> Simulation<F> {
    /// Fails with [`Error::InvalidParam`] if the force or the annihilation rule is invalid.
    pub fn new(charges: Vec<Charge>, force: F, annihilation: Annihilation) -> Result<Self> {
        force.validate()?;
        annihilation.validate()?;

        Ok(Self {
            charges,
            force,
            annihilation,
            execution: Execution::SingleThreaded,
            steps: 0,
            annihilated: 0,
        })
    }

    /// Calculate the forces with multiple threads.
    #[must_use]
    pub fn multithreaded(mut self, num_threads: usize) -> Self {
        self.execution = Execution::Multithreaded { num_threads };
        self
    }

    /// Use Rayon to calculate the forces with multiple threads.
    #[cfg(feature = "rayon")]
    #[must_use]
    pub fn rayon_iter(mut self) -> Self {
        self.execution = Execution::RayonIter;
        self
    }

    pub fn charges(&self) -> &[Charge] {
        &self.charges
    }

    pub fn into_charges(self) -> Vec<Charge> {
        self.charges
    }

    pub fn len(&self) -> usize {
        self.charges.len()
    }

    /// An empty simulation stays empty; drivers can stop here.
    pub fn is_empty(&self) -> bool {
        self.charges.is_empty()
    }

    /// Number of steps taken so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Number of charges removed by annihilation so far.
    pub fn annihilated(&self) -> usize {
        self.annihilated
    }

    pub fn force(&self) -> &F {
        &self.force
    }

    pub fn annihilation(&self) -> &Annihilation {
        &self.annihilation
    }

    /// Advance by one time step.
    ///
    /// On error the state is left as it was before the call.
    pub fn step(&mut self, dt: f64) -> Result<()> {
        let before = self.charges.len();
        let next = step_with(
            self.charges.clone(),
            dt,
            &self.force,
            &self.annihilation,
            self.execution,
        )?;

        self.annihilated += before - next.len();
        self.charges = next;
        self.steps += 1;
        Ok(())
    }

    /// Take up to `num_steps` steps, stopping early once no charges are left.
    ///
    /// Returns the number of steps taken.
    pub fn simulate(&mut self, dt: f64, num_steps: usize) -> Result<usize> {
        for t in 0..num_steps {
            if self.is_empty() {
                return Ok(t);
            }
            self.step(dt)?;
        }
        Ok(num_steps)
    }
}
