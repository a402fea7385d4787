use serde::{Deserialize, Serialize};

use crate::{
    kinematics::{difference, magnitude},
    Charge, Error, Result,
};

/// Pairwise removal of opposite charges that came too close.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Annihilation {
    /// Opposite charges closer than this annihilate.
    pub radius: f64,
}

impl Default for Annihilation {
    fn default() -> Self {
        Self { radius: 1. }
    }
}

impl Annihilation {
    #[must_use]
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.radius.is_finite() && self.radius >= 0.) {
            return Err(Error::InvalidParam(
                "annihilation radius must be finite and >= 0".into(),
            ));
        }
        Ok(())
    }

    /// Mark every charge that annihilates in this pass.
    ///
    /// Pairs are visited in index order and a marked charge is never matched
    /// again, so each charge takes part in at most one annihilation.
    #[must_use]
    pub fn mark(&self, charges: &[Charge]) -> Vec<bool> {
        let mut marked = vec![false; charges.len()];

        for (i, c1) in charges.iter().enumerate() {
            if marked[i] {
                continue;
            }
            for (j, c2) in charges.iter().enumerate().skip(i + 1) {
                if marked[j] || !c1.sign().is_opposite(c2.sign()) {
                    continue;
                }
                if magnitude(&difference(c1.position(), c2.position())) < self.radius {
                    marked[i] = true;
                    marked[j] = true;
                    break;
                }
            }
        }

        marked
    }

    /// Remove all annihilating pairs, keeping the survivors in order.
    #[must_use]
    pub fn apply(&self, charges: Vec<Charge>) -> Vec<Charge> {
        if charges.len() < 2 {
            return charges;
        }

        let marked = self.mark(&charges);
        charges
            .into_iter()
            .zip(marked)
            .filter_map(|(c, m)| (!m).then_some(c))
            .collect()
    }
}

/// Remove all annihilating pairs from `charges`.
#[must_use]
pub fn annihilate(charges: Vec<Charge>, annihilation: &Annihilation) -> Vec<Charge> {
    annihilation.apply(charges)
}

#[cfg(test)]
mod tests {
    use nalgebra::Vector2;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;
    use crate::{ChargeId, Sign};

    fn charge(id: u32, sign: Sign, x: f64, y: f64) -> Charge {
        Charge::new(ChargeId(id), 1e4, sign, Vector2::new(x, y)).unwrap()
    }

    fn ids(charges: &[Charge]) -> Vec<u32> {
        charges.iter().map(|c| c.id().0).collect()
    }

    #[test]
    fn close_pair_annihilates() {
        let charges = vec![
            charge(0, Sign::Positive, 0., 0.),
            charge(1, Sign::Negative, 0.5, 0.),
        ];
        assert!(annihilate(charges, &Annihilation::default()).is_empty());
    }

    #[test]
    fn distance_is_strict() {
        let charges = vec![
            charge(0, Sign::Positive, 0., 0.),
            charge(1, Sign::Negative, 1., 0.),
        ];
        assert_eq!(annihilate(charges, &Annihilation::default()).len(), 2);
    }

    #[test]
    fn like_charges_never_annihilate() {
        let charges = vec![
            charge(0, Sign::Negative, 0., 0.),
            charge(1, Sign::Negative, 0., 0.),
        ];
        assert_eq!(annihilate(charges, &Annihilation::default()).len(), 2);
    }

    #[test]
    fn trivial_collections() {
        let ann = Annihilation::default();
        assert!(ann.apply(Vec::new()).is_empty());

        let single = vec![charge(0, Sign::Positive, 0., 0.)];
        assert_eq!(ann.apply(single.clone()), single);
    }

    #[test]
    fn first_match_wins() {
        // both negatives are in range of the positive one
        let charges = vec![
            charge(0, Sign::Positive, 0., 0.),
            charge(1, Sign::Negative, 0.5, 0.),
            charge(2, Sign::Negative, -0.5, 0.),
        ];
        let survivors = annihilate(charges, &Annihilation::default());
        assert_eq!(ids(&survivors), vec![2]);

        // a chain: the middle charge pairs with the first one only
        let charges = vec![
            charge(0, Sign::Negative, 0., 0.),
            charge(1, Sign::Positive, 0.6, 0.),
            charge(2, Sign::Negative, 1.2, 0.),
            charge(3, Sign::Positive, 40., 40.),
        ];
        let survivors = annihilate(charges, &Annihilation::default());
        assert_eq!(ids(&survivors), vec![2, 3]);
    }

    #[test]
    fn survivors_keep_order() {
        let charges = vec![
            charge(0, Sign::Positive, -20., 0.),
            charge(1, Sign::Positive, 0., 0.),
            charge(2, Sign::Negative, 30., 0.),
            charge(3, Sign::Negative, 0.1, 0.1),
            charge(4, Sign::Negative, 20., 0.),
        ];
        let survivors = annihilate(charges, &Annihilation::default());
        assert_eq!(ids(&survivors), vec![0, 2, 4]);
    }

    #[test]
    fn random_population() {
        let mut rng = StdRng::seed_from_u64(0);
        let ann = Annihilation::default();

        for _ in 0..20 {
            let charges: Vec<_> = (0..200)
                .map(|i| {
                    let sign = if rng.gen_bool(0.5) {
                        Sign::Positive
                    } else {
                        Sign::Negative
                    };
                    charge(i, sign, rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0))
                })
                .collect();

            let before = charges.len();
            let once = ann.apply(charges);
            assert!(once.len() <= before);
            assert_eq!((before - once.len()) % 2, 0);

            let twice = ann.apply(once.clone());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn validation() {
        assert!(Annihilation::default().validate().is_ok());
        assert!(Annihilation::new(-1.).validate().is_err());
        assert!(Annihilation::new(f64::NAN).validate().is_err());
    }
}
