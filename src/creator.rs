use nalgebra::Vector2;
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use rand_distr::{Distribution, Uniform};

use crate::{Charge, ChargeId, Error, Result, Sign};

pub trait ChargeCreator {
    fn create_charge(&mut self) -> Result<Charge>;

    fn create_charges(&mut self, n: u32) -> Result<Vec<Charge>> {
        (0..n).map(|_| self.create_charge()).collect()
    }
}

/// Charges at rest with random positions and a mass depending on their sign.
pub struct RandomChargeCreator<R, PD>
where
    R: Rng,
    PD: Distribution<f64>,
{
    rng: R,
    position_distr: PD,
    positive_mass: f64,
    negative_mass: f64,
    next_id: u32,
}

impl RandomChargeCreator<StdRng, Uniform<f64>> {
    /// Seeded creator placing charges uniformly in the square `[-half_width, half_width)²`.
    pub fn new(seed: u64, positive_mass: f64, negative_mass: f64, half_width: f64) -> Result<Self> {
        if !(half_width.is_finite() && half_width > 0.) {
            return Err(Error::InvalidParam(format!(
                "half width must be finite and > 0, got {half_width}"
            )));
        }

        Ok(Self::rng(
            Uniform::new(-half_width, half_width),
            positive_mass,
            negative_mass,
            StdRng::seed_from_u64(seed),
        ))
    }
}

impl<R, PD> RandomChargeCreator<R, PD>
where
    R: Rng,
    PD: Distribution<f64>,
{
    pub fn rng(position_distr: PD, positive_mass: f64, negative_mass: f64, rng: R) -> Self {
        Self {
            rng,
            position_distr,
            positive_mass,
            negative_mass,
            next_id: 0,
        }
    }

    fn create_signed(&mut self, sign: Sign) -> Result<Charge> {
        let mass = match sign {
            Sign::Positive => self.positive_mass,
            Sign::Negative => self.negative_mass,
        };
        let position = Vector2::new(
            self.position_distr.sample(&mut self.rng),
            self.position_distr.sample(&mut self.rng),
        );

        let id = ChargeId(self.next_id);
        self.next_id += 1;
        Charge::new(id, mass, sign, position)
    }
}

impl<R, PD> ChargeCreator for RandomChargeCreator<R, PD>
where
    R: Rng,
    PD: Distribution<f64>,
{
    fn create_charge(&mut self) -> Result<Charge> {
        let sign = if self.rng.gen_bool(0.5) {
            Sign::Positive
        } else {
            Sign::Negative
        };
        self.create_signed(sign)
    }

    /// `n / 2` positive and `n - n / 2` negative charges in shuffled order.
    fn create_charges(&mut self, n: u32) -> Result<Vec<Charge>> {
        let num_positive = (n / 2) as usize;
        let mut signs: Vec<_> = (0..n as usize)
            .map(|i| {
                if i < num_positive {
                    Sign::Positive
                } else {
                    Sign::Negative
                }
            })
            .collect();
        signs.shuffle(&mut self.rng);

        signs.into_iter().map(|s| self.create_signed(s)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_signs() {
        for n in [0, 1, 2, 7, 100] {
            let mut pc = RandomChargeCreator::new(0, 1e4, 2e4, 50.).unwrap();
            let charges = pc.create_charges(n).unwrap();

            let positive = charges
                .iter()
                .filter(|c| c.sign() == Sign::Positive)
                .count();
            assert_eq!(charges.len(), n as usize);
            assert_eq!(positive, (n / 2) as usize);
        }
    }

    #[test]
    fn charges_inside_box_at_rest() {
        let mut pc = RandomChargeCreator::new(3, 1e4, 2e4, 50.).unwrap();
        for c in pc.create_charges(200).unwrap() {
            assert!(c.position().iter().all(|x| (-50.0..50.0).contains(x)));
            assert_eq!(*c.velocity(), Vector2::zeros());
            let expected = match c.sign() {
                Sign::Positive => 1e4,
                Sign::Negative => 2e4,
            };
            assert_eq!(c.mass(), expected);
        }
    }

    #[test]
    fn sequential_ids() {
        let mut pc = RandomChargeCreator::new(1, 1., 1., 10.).unwrap();
        let charges = pc.create_charges(5).unwrap();
        let single = pc.create_charge().unwrap();

        let ids: Vec<_> = charges.iter().map(|c| c.id().0).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
        assert_eq!(single.id(), ChargeId(5));
    }

    #[test]
    fn seeded_runs_repeat() {
        let a = RandomChargeCreator::new(11, 1., 1., 50.)
            .unwrap()
            .create_charges(20)
            .unwrap();
        let b = RandomChargeCreator::new(11, 1., 1., 50.)
            .unwrap()
            .create_charges(20)
            .unwrap();
        let c = RandomChargeCreator::new(12, 1., 1., 50.)
            .unwrap()
            .create_charges(20)
            .unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn invalid_box() {
        assert!(RandomChargeCreator::new(0, 1., 1., 0.).is_err());
        assert!(RandomChargeCreator::new(0, 1., 1., f64::NAN).is_err());
    }

    #[test]
    fn invalid_mass() {
        let mut pc = RandomChargeCreator::new(0, 0., 1., 50.).unwrap();
        assert!(matches!(
            pc.create_charges(4),
            Err(Error::NonPositiveMass(_))
        ));
    }
}
