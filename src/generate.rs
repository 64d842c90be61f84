use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng, seq::SliceRandom};
use rand_chacha::ChaChaRng;
use rand_distr::{Uniform, Distribution};
use serde::{Serialize, Deserialize};

use crate::aircraft::{Aircraft, Priority};
use crate::error::EnvError;

pub const CARRIER_CODES: [&str; 20] = [
    "AF", "DL", "UA", "AA", "BA", "LH", "EK", "QF", "JL", "SQ",
    "AI", "KL", "VS", "IB", "AZ", "TK", "EY", "QR", "CX", "NH",
];

/// Stochastic arrival process. It only manufactures new aircraft and never
/// looks at the queue they are appended to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrivalGenerator {
    /// Inclusive bounds on the number of aircraft per batch
    pub batch_size: [usize; 2],
    /// Inclusive bounds on the initial fuel
    pub fuel: [i32; 2],
    /// Inclusive bounds on the ticks before joining the queue
    pub eta: [u32; 2],
    /// Inclusive bounds on the distance metric
    pub distance: [u32; 2],
    /// Inclusive bounds on the numeric part of the identifier
    pub flight_number: [u32; 2],
    pub emergency_probability: f64,
    pub carriers: Vec<String>,
}

impl Default for ArrivalGenerator {
    fn default() -> Self {
        ArrivalGenerator {
            batch_size: [1, 3],
            fuel: [5, 20],
            eta: [0, 3],
            distance: [1, 9],
            flight_number: [100, 999],
            emergency_probability: 0.05,
            carriers: CARRIER_CODES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl ArrivalGenerator {

    pub fn validate(&self) -> Result<(), EnvError> {
        check_range("arrivals.batch_size", self.batch_size)?;
        if self.batch_size[0] == 0 {
            return Err(EnvError::config("arrivals.batch_size", "a batch must contain at least one aircraft"));
        }
        check_range("arrivals.fuel", self.fuel)?;
        if self.fuel[0] < 0 {
            return Err(EnvError::config("arrivals.fuel", "initial fuel cannot be negative"));
        }
        check_range("arrivals.eta", self.eta)?;
        check_range("arrivals.distance", self.distance)?;
        check_range("arrivals.flight_number", self.flight_number)?;
        if !(0.0..=1.0).contains(&self.emergency_probability) {
            return Err(EnvError::config("arrivals.emergency_probability", "must lie in [0, 1]"));
        }
        if self.carriers.is_empty() {
            return Err(EnvError::config("arrivals.carriers", "at least one carrier code is required"));
        }
        Ok(())
    }

    /// Produces the batch of new aircraft for `step_index`.
    ///
    /// The step index does not influence the draw; it is accepted so that
    /// arrival processes can be swapped for time-dependent ones.
    pub fn generate(&self, _step_index: u32, rng: &mut impl Rng) -> Vec<Aircraft> {
        let rand_batch = Uniform::new_inclusive(self.batch_size[0], self.batch_size[1]);
        let nb_aircrafts = rand_batch.sample(rng);

        (0..nb_aircrafts).map(|_| self.generate_aircraft(rng)).collect()
    }

    fn generate_aircraft(&self, rng: &mut impl Rng) -> Aircraft {
        let rand_number = Uniform::new_inclusive(self.flight_number[0], self.flight_number[1]);
        let rand_fuel = Uniform::new_inclusive(self.fuel[0], self.fuel[1]);
        let rand_eta = Uniform::new_inclusive(self.eta[0], self.eta[1]);
        let rand_priority = Uniform::<f64>::new(0.0, 1.0);
        let rand_distance = Uniform::new_inclusive(self.distance[0], self.distance[1]);

        let carrier = self.carriers.choose(rng).map(String::as_str).unwrap_or_default();
        let id = format!("{carrier}{:03}", rand_number.sample(rng));
        let fuel = rand_fuel.sample(rng);
        let eta = rand_eta.sample(rng);
        let priority = if rand_priority.sample(rng) < self.emergency_probability {
            Priority::Emergency
        } else {
            Priority::Normal
        };

        Aircraft::new(id, fuel, eta, priority).with_distance(rand_distance.sample(rng))
    }

}

fn check_range<T: PartialOrd>(field: &str, range: [T; 2]) -> Result<(), EnvError> {
    if range[0] > range[1] {
        Err(EnvError::config(field, "lower bound exceeds upper bound"))
    } else {
        Ok(())
    }
}

/// Builds the random source owned by one environment instance.
pub fn seeded_rng(init: u64) -> ChaChaRng {
    let mut seed = [0_u8; 32];
    seed.iter_mut().zip(init.to_be_bytes().into_iter()).for_each(|(s, i)| *s = i);
    seed.iter_mut().rev().zip(init.to_le_bytes().into_iter()).for_each(|(s, i)| *s = i);
    ChaChaRng::from_seed(seed)
}

/// Seed used when the caller does not provide one.
pub fn entropy_seed() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis() as u64).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batches_respect_bounds() {
        let generator = ArrivalGenerator::default();
        let mut rng = seeded_rng(7);
        for step in 0..200 {
            let batch = generator.generate(step, &mut rng);
            assert!((1..=3).contains(&batch.len()));
            for a in batch {
                assert!((5..=20).contains(&a.fuel));
                assert!(a.eta <= 3);
                assert!((1..=9).contains(&a.distance));
                assert_eq!(a.wait_time, 0);
                assert_eq!(a.id.len(), 5);
                assert!(CARRIER_CODES.contains(&&a.id[..2]));
                let number = a.id[2..].parse::<u32>().unwrap();
                assert!((100..=999).contains(&number));
            }
        }
    }

    #[test]
    fn test_same_seed_same_batches() {
        let generator = ArrivalGenerator::default();
        let mut rng_a = seeded_rng(42);
        let mut rng_b = seeded_rng(42);
        for step in (0..50).step_by(5) {
            assert_eq!(generator.generate(step, &mut rng_a), generator.generate(step, &mut rng_b));
        }
    }

    #[test]
    fn test_emergency_probability_extremes() {
        let mut generator = ArrivalGenerator::default();
        let mut rng = seeded_rng(3);
        generator.emergency_probability = 1.0;
        assert!(generator.generate(0, &mut rng).iter().all(|a| a.is_emergency()));
        generator.emergency_probability = 0.0;
        assert!(generator.generate(0, &mut rng).iter().all(|a| !a.is_emergency()));
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        let mut generator = ArrivalGenerator::default();
        generator.fuel = [20, 5];
        assert!(generator.validate().is_err());

        let mut generator = ArrivalGenerator::default();
        generator.carriers.clear();
        assert!(generator.validate().is_err());

        let mut generator = ArrivalGenerator::default();
        generator.emergency_probability = 1.5;
        assert!(generator.validate().is_err());

        assert!(ArrivalGenerator::default().validate().is_ok());
    }
}
