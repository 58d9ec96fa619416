//! Single-crossover meiosis.
//!
//! Each linkage group undergoes exactly one crossover at a point drawn
//! uniformly from `[1, loci_per_group - 1]`. One of the four resulting
//! chromatids (two recombinant, two parental) is transmitted with equal
//! probability.

use crate::base::AlleleSequence;
use crate::errors::ConfigError;
use crate::genome::{Gamete, Haplotype, Individual};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Chromatid of the meiotic tetrad transmitted to the gamete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chromatid {
    /// Homolog A before the crossover point, homolog B after it
    RecombinantA,
    /// Homolog B before the crossover point, homolog A after it
    RecombinantB,
    /// Homolog A unchanged
    ParentalA,
    /// Homolog B unchanged
    ParentalB,
}

impl Chromatid {
    pub const ALL: [Chromatid; 4] = [
        Self::RecombinantA,
        Self::RecombinantB,
        Self::ParentalA,
        Self::ParentalB,
    ];

    /// Map a uniform draw in `[0, 1)` onto the four chromatids in quarters.
    #[inline]
    pub fn from_uniform(x: f64) -> Self {
        if x < 0.25 {
            Self::RecombinantA
        } else if x < 0.5 {
            Self::RecombinantB
        } else if x < 0.75 {
            Self::ParentalA
        } else {
            Self::ParentalB
        }
    }

    /// Index of this chromatid within [`Chromatid::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Outcome of meiosis for one linkage group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeiosisEvent {
    /// Crossover point: number of loci taken from the first homolog
    pub crossover: usize,
    /// Transmitted chromatid
    pub chromatid: Chromatid,
}

impl MeiosisEvent {
    /// Write the chromatid selected by this event into `dest`.
    #[inline]
    pub fn resolve_into(
        &self,
        homolog_a: &AlleleSequence,
        homolog_b: &AlleleSequence,
        dest: &mut AlleleSequence,
    ) {
        match self.chromatid {
            Chromatid::RecombinantA => dest.splice_from(homolog_a, homolog_b, self.crossover),
            Chromatid::RecombinantB => dest.splice_from(homolog_b, homolog_a, self.crossover),
            Chromatid::ParentalA => dest.copy_from(homolog_a),
            Chromatid::ParentalB => dest.copy_from(homolog_b),
        }
    }

    /// Return the chromatid selected by this event as a new sequence.
    pub fn resolve(
        &self,
        homolog_a: &AlleleSequence,
        homolog_b: &AlleleSequence,
    ) -> AlleleSequence {
        let mut out = homolog_a.clone();
        self.resolve_into(homolog_a, homolog_b, &mut out);
        out
    }
}

/// Single obligate crossover recombination model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecombinationModel {
    loci_per_group: usize,
}

impl RecombinationModel {
    /// Create a model for linkage groups of `loci_per_group` loci.
    ///
    /// # Errors
    /// At least two loci are needed for an interior crossover point to exist.
    pub fn new(loci_per_group: usize) -> Result<Self, ConfigError> {
        if loci_per_group < 2 {
            return Err(ConfigError::new(
                "loci_per_group",
                format!("{loci_per_group} loci leaves no crossover point (need at least 2)"),
            ));
        }
        Ok(Self { loci_per_group })
    }

    #[inline]
    pub fn loci_per_group(&self) -> usize {
        self.loci_per_group
    }

    /// Sample the meiosis outcome for one linkage group.
    ///
    /// The crossover point is drawn first, then a single uniform draw picks
    /// the chromatid.
    #[inline]
    pub fn sample_event<R: Rng + ?Sized>(&self, rng: &mut R) -> MeiosisEvent {
        let crossover = rng.random_range(1..self.loci_per_group);
        let chromatid = Chromatid::from_uniform(rng.random::<f64>());
        MeiosisEvent {
            crossover,
            chromatid,
        }
    }

    /// Produce a gamete from `individual`, one independent meiosis per
    /// linkage group.
    pub fn recombine<R: Rng + ?Sized>(&self, individual: &Individual, rng: &mut R) -> Gamete {
        let mut gamete = individual.haplotype_a().clone();
        self.recombine_into(individual, rng, &mut gamete);
        gamete
    }

    /// Produce a gamete from `individual` directly into `dest`, reusing its
    /// buffers.
    ///
    /// # Panics
    /// Panics if `dest` does not have the individual's geometry.
    pub fn recombine_into<R: Rng + ?Sized>(
        &self,
        individual: &Individual,
        rng: &mut R,
        dest: &mut Haplotype,
    ) {
        let (hap_a, hap_b) = individual.haplotypes();
        for ((a, b), out) in hap_a
            .groups()
            .iter()
            .zip(hap_b.groups())
            .zip(dest.groups_mut())
        {
            let event = self.sample_event(rng);
            event.resolve_into(a, b, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::Allele;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn heterozygote(groups: usize, loci: usize) -> Individual {
        Individual::new(
            Haplotype::uniform(Allele::Wild, groups, loci),
            Haplotype::uniform(Allele::Crop, groups, loci),
        )
    }

    #[test]
    fn test_model_rejects_single_locus() {
        assert!(RecombinationModel::new(1).is_err());
        assert!(RecombinationModel::new(0).is_err());
        assert!(RecombinationModel::new(2).is_ok());
    }

    #[test]
    fn test_chromatid_from_uniform_quarters() {
        assert_eq!(Chromatid::from_uniform(0.0), Chromatid::RecombinantA);
        assert_eq!(Chromatid::from_uniform(0.2499), Chromatid::RecombinantA);
        assert_eq!(Chromatid::from_uniform(0.25), Chromatid::RecombinantB);
        assert_eq!(Chromatid::from_uniform(0.5), Chromatid::ParentalA);
        assert_eq!(Chromatid::from_uniform(0.75), Chromatid::ParentalB);
        assert_eq!(Chromatid::from_uniform(0.9999), Chromatid::ParentalB);
    }

    #[test]
    fn test_crossover_point_in_interior() {
        let model = RecombinationModel::new(5).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [false; 5];
        for _ in 0..2_000 {
            let event = model.sample_event(&mut rng);
            assert!((1..5).contains(&event.crossover));
            seen[event.crossover] = true;
        }
        assert!(!seen[0]);
        assert!(seen[1..].iter().all(|&s| s));
    }

    #[test]
    fn test_resolve_recombinants() {
        let a: AlleleSequence = "000000".parse().unwrap();
        let b: AlleleSequence = "111111".parse().unwrap();

        let event = MeiosisEvent {
            crossover: 2,
            chromatid: Chromatid::RecombinantA,
        };
        assert_eq!(event.resolve(&a, &b).to_string(), "001111");

        let event = MeiosisEvent {
            crossover: 2,
            chromatid: Chromatid::RecombinantB,
        };
        assert_eq!(event.resolve(&a, &b).to_string(), "110000");

        let event = MeiosisEvent {
            crossover: 2,
            chromatid: Chromatid::ParentalA,
        };
        assert_eq!(event.resolve(&a, &b), a);

        let event = MeiosisEvent {
            crossover: 2,
            chromatid: Chromatid::ParentalB,
        };
        assert_eq!(event.resolve(&a, &b), b);
    }

    #[test]
    fn test_recombinant_is_prefix_a_suffix_b() {
        let a: AlleleSequence = "0101010101".parse().unwrap();
        let b: AlleleSequence = "1100110011".parse().unwrap();
        for r in 1..10 {
            let event = MeiosisEvent {
                crossover: r,
                chromatid: Chromatid::RecombinantA,
            };
            let out = event.resolve(&a, &b);
            assert_eq!(out.len(), 10);
            assert_eq!(&out.as_slice()[..r], &a.as_slice()[..r]);
            assert_eq!(&out.as_slice()[r..], &b.as_slice()[r..]);
        }
    }

    #[test]
    fn test_recombine_preserves_geometry() {
        let model = RecombinationModel::new(8).unwrap();
        let parent = heterozygote(4, 8);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100 {
            let gamete = model.recombine(&parent, &mut rng);
            assert_eq!(gamete.len(), 4);
            assert!(gamete.groups().iter().all(|g| g.len() == 8));
        }
    }

    #[test]
    fn test_recombine_into_matches_recombine() {
        let model = RecombinationModel::new(6).unwrap();
        let parent = heterozygote(3, 6);

        let mut rng1 = StdRng::seed_from_u64(11);
        let mut rng2 = StdRng::seed_from_u64(11);

        let gamete = model.recombine(&parent, &mut rng1);
        let mut dest = Haplotype::uniform(Allele::Wild, 3, 6);
        model.recombine_into(&parent, &mut rng2, &mut dest);

        assert_eq!(gamete, dest);
    }

    #[test]
    fn test_chromatid_frequencies_are_uniform() {
        let model = RecombinationModel::new(100).unwrap();
        let mut rng = StdRng::seed_from_u64(2022);
        let draws = 10_000;
        let mut counts = [0usize; 4];

        for _ in 0..draws {
            counts[model.sample_event(&mut rng).chromatid.index()] += 1;
        }

        for count in counts {
            let freq = count as f64 / draws as f64;
            assert!((freq - 0.25).abs() < 0.02, "frequency {freq} outside tolerance");
        }
    }

    #[test]
    fn test_homozygous_parent_transmits_itself() {
        let model = RecombinationModel::new(10).unwrap();
        let parent = Individual::uniform(Allele::Crop, 2, 10);
        let mut rng = StdRng::seed_from_u64(1);
        let gamete = model.recombine(&parent, &mut rng);
        assert_eq!(gamete, Haplotype::crop(2, 10));
    }
}
