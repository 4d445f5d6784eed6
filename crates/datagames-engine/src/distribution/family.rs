use std::f64::consts::PI;

use rand::{Rng, distr::Uniform};
use rand_distr::{Beta, Cauchy, Distribution, Gamma, Normal};
use serde::{Deserialize, Serialize};

/// Error returned when a family key does not name a registered family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown distribution family key: {key}")]
pub struct UnknownFamilyError {
    pub key: u8,
}

/// The parametric distribution families offered as guessing targets.
///
/// Each variant pairs a sampler with its analytic density. Keys are stable
/// integers starting at 1, in declaration order.
///
/// | Key | Name      | Distribution                        |
/// |-----|-----------|-------------------------------------|
/// | 1   | `normal`  | Gaussian, mean 0, scale 0.1         |
/// | 2   | `Lorentz` | Standard Cauchy, limited to (-25, 25) |
/// | 3   | `power`   | Power law with shape 5 on \[0, 1\]  |
/// | 4   | `uniform` | Uniform on \[0, 5)                  |
/// | 5   | `gamma`   | Gamma with shape 2, scale 2         |
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    #[display("normal")]
    Normal,
    #[display("Lorentz")]
    Lorentz,
    #[display("power")]
    Power,
    #[display("uniform")]
    Uniform,
    #[display("gamma")]
    Gamma,
}

const NORMAL_SCALE: f64 = 0.1;
const LORENTZ_LIMIT: f64 = 25.0;
const POWER_SHAPE: f64 = 5.0;
const UNIFORM_HIGH: f64 = 5.0;
const GAMMA_SHAPE: f64 = 2.0;
const GAMMA_SCALE: f64 = 2.0;

impl Family {
    /// All families, ordered by key.
    pub const ALL: [Self; 5] = [
        Self::Normal,
        Self::Lorentz,
        Self::Power,
        Self::Uniform,
        Self::Gamma,
    ];

    /// Looks up a family by its key.
    ///
    /// ```
    /// # use datagames_engine::Family;
    /// assert_eq!(Family::from_key(2), Ok(Family::Lorentz));
    /// assert!(Family::from_key(6).is_err());
    /// ```
    pub fn from_key(key: u8) -> Result<Self, UnknownFamilyError> {
        key.checked_sub(1)
            .and_then(|idx| Self::ALL.get(usize::from(idx)))
            .copied()
            .ok_or(UnknownFamilyError { key })
    }

    /// Returns the stable key of this family.
    #[must_use]
    pub const fn key(self) -> u8 {
        match self {
            Self::Normal => 1,
            Self::Lorentz => 2,
            Self::Power => 3,
            Self::Uniform => 4,
            Self::Gamma => 5,
        }
    }

    /// Returns the display name players have to guess.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Lorentz => "Lorentz",
            Self::Power => "power",
            Self::Uniform => "uniform",
            Self::Gamma => "gamma",
        }
    }

    /// Returns whether `guess` names this family, ignoring surrounding
    /// whitespace and letter case.
    #[must_use]
    pub fn matches_name(self, guess: &str) -> bool {
        guess.trim().to_lowercase() == self.name().to_lowercase()
    }

    /// Draws `count` values and applies the family's post-filter.
    ///
    /// The returned sequence may be shorter than `count` for families with a
    /// post-filter (see [`Self::retains`]).
    #[must_use]
    pub fn sample<R>(self, count: usize, rng: &mut R) -> Vec<f64>
    where
        R: Rng + ?Sized,
    {
        match self {
            Self::Normal => self.draw(
                Normal::new(0.0, NORMAL_SCALE).expect("valid normal parameters"),
                count,
                rng,
            ),
            Self::Lorentz => self.draw(
                Cauchy::new(0.0, 1.0).expect("valid cauchy parameters"),
                count,
                rng,
            ),
            // Power law a·x^(a-1) on [0, 1] is Beta(a, 1)
            Self::Power => self.draw(
                Beta::new(POWER_SHAPE, 1.0).expect("valid beta parameters"),
                count,
                rng,
            ),
            Self::Uniform => self.draw(
                Uniform::new(0.0, UNIFORM_HIGH).expect("valid uniform bounds"),
                count,
                rng,
            ),
            Self::Gamma => self.draw(
                Gamma::new(GAMMA_SHAPE, GAMMA_SCALE).expect("valid gamma parameters"),
                count,
                rng,
            ),
        }
    }

    fn draw<D, R>(self, dist: D, count: usize, rng: &mut R) -> Vec<f64>
    where
        D: Distribution<f64>,
        R: Rng + ?Sized,
    {
        (0..count)
            .map(|_| dist.sample(rng))
            .filter(|&x| self.retains(x))
            .collect()
    }

    /// Returns whether a drawn value is kept in the sample set.
    ///
    /// Only the heavy-tailed Lorentz family filters: values outside the open
    /// interval (-25, 25) are dropped so the histogram stays readable.
    #[must_use]
    pub fn retains(self, x: f64) -> bool {
        match self {
            Self::Lorentz => -LORENTZ_LIMIT < x && x < LORENTZ_LIMIT,
            Self::Normal | Self::Power | Self::Uniform | Self::Gamma => true,
        }
    }

    /// Evaluates the probability density at `x`.
    ///
    /// Densities are zero outside each family's support.
    #[must_use]
    pub fn density_at(self, x: f64) -> f64 {
        match self {
            Self::Normal => {
                let z = x / NORMAL_SCALE;
                (-0.5 * z * z).exp() / (NORMAL_SCALE * (2.0 * PI).sqrt())
            }
            Self::Lorentz => 1.0 / (PI * (1.0 + x * x)),
            Self::Power => {
                if (0.0..=1.0).contains(&x) {
                    POWER_SHAPE * x.powf(POWER_SHAPE - 1.0)
                } else {
                    0.0
                }
            }
            Self::Uniform => {
                if (0.0..=UNIFORM_HIGH).contains(&x) {
                    1.0 / UNIFORM_HIGH
                } else {
                    0.0
                }
            }
            Self::Gamma => {
                if x >= 0.0 {
                    // Γ(2) = 1
                    x * (-x / GAMMA_SCALE).exp() / GAMMA_SCALE.powf(GAMMA_SHAPE)
                } else {
                    0.0
                }
            }
        }
    }

    /// Evaluates the probability density at every point of `xs`.
    #[must_use]
    pub fn density(self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.density_at(x)).collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(314)
    }

    /// Trapezoidal integral of the density over `[lo, hi]`.
    #[expect(clippy::cast_precision_loss)]
    fn integrate(family: Family, lo: f64, hi: f64, steps: usize) -> f64 {
        let h = (hi - lo) / steps as f64;
        let inner = (1..steps)
            .map(|i| family.density_at(lo + h * i as f64))
            .sum::<f64>();
        h * (inner + 0.5 * (family.density_at(lo) + family.density_at(hi)))
    }

    #[test]
    fn test_keys_roundtrip() {
        for family in Family::ALL {
            assert_eq!(Family::from_key(family.key()), Ok(family));
        }
        assert_eq!(Family::from_key(0), Err(UnknownFamilyError { key: 0 }));
        assert_eq!(Family::from_key(6), Err(UnknownFamilyError { key: 6 }));
    }

    #[test]
    fn test_display_is_name() {
        for family in Family::ALL {
            assert_eq!(family.to_string(), family.name());
        }
    }

    #[test]
    fn test_matches_name_ignores_case_and_whitespace() {
        assert!(Family::Lorentz.matches_name("  lOrEnTz \t"));
        assert!(Family::Normal.matches_name("NORMAL"));
        assert!(!Family::Normal.matches_name("gaussian"));
        assert!(!Family::Gamma.matches_name(""));
    }

    #[test]
    fn test_zero_count_is_empty() {
        for family in Family::ALL {
            assert!(family.sample(0, &mut rng()).is_empty());
        }
    }

    #[test]
    fn test_samples_lie_in_support() {
        let mut rng = rng();
        let lorentz = Family::Lorentz.sample(5000, &mut rng);
        assert!(lorentz.iter().all(|&x| -25.0 < x && x < 25.0));
        assert!(lorentz.len() <= 5000);
        // P(|X| >= 25) is about 2.5% for the standard Cauchy
        assert!(lorentz.len() > 4500);

        let power = Family::Power.sample(2000, &mut rng);
        assert_eq!(power.len(), 2000);
        assert!(power.iter().all(|&x| (0.0..=1.0).contains(&x)));

        let uniform = Family::Uniform.sample(2000, &mut rng);
        assert!(uniform.iter().all(|&x| (0.0..5.0).contains(&x)));

        let gamma = Family::Gamma.sample(2000, &mut rng);
        assert!(gamma.iter().all(|&x| x >= 0.0));

        let normal = Family::Normal.sample(2000, &mut rng);
        assert!(normal.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn test_sample_means_match_distribution() {
        let mut rng = rng();
        let mean = |xs: &[f64]| {
            #[expect(clippy::cast_precision_loss)]
            let n = xs.len() as f64;
            xs.iter().sum::<f64>() / n
        };
        assert!(mean(&Family::Normal.sample(10_000, &mut rng)).abs() < 0.01);
        assert!((mean(&Family::Power.sample(10_000, &mut rng)) - 5.0 / 6.0).abs() < 0.01);
        assert!((mean(&Family::Uniform.sample(10_000, &mut rng)) - 2.5).abs() < 0.05);
        assert!((mean(&Family::Gamma.sample(10_000, &mut rng)) - 4.0).abs() < 0.15);
    }

    #[test]
    fn test_density_is_non_negative_and_same_length() {
        let xs = (-300..=300).map(|i| f64::from(i) / 10.0).collect::<Vec<_>>();
        for family in Family::ALL {
            let ys = family.density(&xs);
            assert_eq!(ys.len(), xs.len());
            assert!(ys.iter().all(|&y| y >= 0.0), "{family}");
        }
    }

    #[test]
    fn test_density_integrates_to_one() {
        assert!((integrate(Family::Normal, -1.0, 1.0, 10_000) - 1.0).abs() < 1e-6);
        assert!((integrate(Family::Power, 0.0, 1.0, 10_000) - 1.0).abs() < 1e-6);
        assert!((integrate(Family::Uniform, 0.0, 5.0, 10_000) - 1.0).abs() < 1e-6);
        assert!((integrate(Family::Gamma, 0.0, 100.0, 100_000) - 1.0).abs() < 1e-6);
        // Cauchy mass outside ±1000 is about 6.4e-4
        assert!((integrate(Family::Lorentz, -1000.0, 1000.0, 200_000) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_density_is_zero_outside_support() {
        assert!(Family::Power.density_at(-0.1).abs() < f64::EPSILON);
        assert!(Family::Power.density_at(1.1).abs() < f64::EPSILON);
        assert!(Family::Uniform.density_at(5.5).abs() < f64::EPSILON);
        assert!(Family::Gamma.density_at(-1.0).abs() < f64::EPSILON);
        assert!((Family::Uniform.density_at(2.0) - 0.2).abs() < f64::EPSILON);
    }
}
