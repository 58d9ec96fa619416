use crate::base::{Allele, AlleleSequence};
use crate::errors::GenomeError;
use crate::genome::Haplotype;

/// A diploid individual.
///
/// `Individual` contains two `Haplotype`s. Linkage group `i` of the individual
/// is the homolog pair `(haplotype_a[i], haplotype_b[i])`; "homolog A" and
/// "homolog B" always refer to these two sides. Offspring built by the mating
/// engine receive the first parent's gamete on side A and the second parent's
/// (or the crop pollen) on side B.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    haplotype_a: Haplotype,
    haplotype_b: Haplotype,
}

impl Individual {
    /// Create a new `Individual` from two haplotypes without checking shape.
    ///
    /// Use [`Individual::try_new`] for caller-supplied data.
    pub fn new(haplotype_a: Haplotype, haplotype_b: Haplotype) -> Self {
        Self {
            haplotype_a,
            haplotype_b,
        }
    }

    /// Create a new `Individual`, checking that both haplotypes have the same
    /// number of linkage groups and that every homolog has the same length as
    /// the first one.
    pub fn try_new(haplotype_a: Haplotype, haplotype_b: Haplotype) -> Result<Self, GenomeError> {
        if haplotype_a.len() != haplotype_b.len() {
            return Err(GenomeError::GroupCountMismatch {
                expected: haplotype_a.len(),
                found: haplotype_b.len(),
            });
        }
        let ind = Self::new(haplotype_a, haplotype_b);
        let loci = ind.haplotype_a.get(0).map_or(0, AlleleSequence::len);
        ind.check_geometry(ind.linkage_groups(), loci)?;
        Ok(ind)
    }

    /// Homozygous individual carrying `allele` at every locus.
    pub fn uniform(allele: Allele, linkage_groups: usize, loci_per_group: usize) -> Self {
        Self::new(
            Haplotype::uniform(allele, linkage_groups, loci_per_group),
            Haplotype::uniform(allele, linkage_groups, loci_per_group),
        )
    }

    /// All-wild individual.
    pub fn wild(linkage_groups: usize, loci_per_group: usize) -> Self {
        Self::uniform(Allele::Wild, linkage_groups, loci_per_group)
    }

    /// Number of linkage groups.
    #[inline]
    pub fn linkage_groups(&self) -> usize {
        self.haplotype_a.len()
    }

    /// Borrow the homolog pair of linkage group `group`.
    #[inline]
    pub fn linkage_group(&self, group: usize) -> Option<(&AlleleSequence, &AlleleSequence)> {
        Some((self.haplotype_a.get(group)?, self.haplotype_b.get(group)?))
    }

    /// Crop-allele dosage (0, 1 or 2) at `locus` of linkage group `group`.
    #[inline]
    pub fn dosage(&self, group: usize, locus: usize) -> Option<u32> {
        let (a, b) = self.linkage_group(group)?;
        Some(a.get(locus)?.dosage() + b.get(locus)?.dosage())
    }

    #[inline]
    pub fn haplotype_a(&self) -> &Haplotype {
        &self.haplotype_a
    }

    #[inline]
    pub fn haplotype_a_mut(&mut self) -> &mut Haplotype {
        &mut self.haplotype_a
    }

    #[inline]
    pub fn haplotype_b(&self) -> &Haplotype {
        &self.haplotype_b
    }

    #[inline]
    pub fn haplotype_b_mut(&mut self) -> &mut Haplotype {
        &mut self.haplotype_b
    }

    /// Borrow both haplotypes as a pair of references.
    pub fn haplotypes(&self) -> (&Haplotype, &Haplotype) {
        (&self.haplotype_a, &self.haplotype_b)
    }

    /// Borrow both haplotypes mutably as a pair of mutable references.
    pub fn haplotypes_mut(&mut self) -> (&mut Haplotype, &mut Haplotype) {
        (&mut self.haplotype_a, &mut self.haplotype_b)
    }

    /// Total crop alleles carried across both haplotypes.
    pub fn crop_count(&self) -> usize {
        self.haplotype_a.crop_count() + self.haplotype_b.crop_count()
    }

    /// Check that this individual has `linkage_groups` groups on both sides
    /// and that every homolog has exactly `loci_per_group` loci.
    pub fn check_geometry(
        &self,
        linkage_groups: usize,
        loci_per_group: usize,
    ) -> Result<(), GenomeError> {
        for hap in [&self.haplotype_a, &self.haplotype_b] {
            if hap.len() != linkage_groups {
                return Err(GenomeError::GroupCountMismatch {
                    expected: linkage_groups,
                    found: hap.len(),
                });
            }
            for (group, seq) in hap.groups().iter().enumerate() {
                if seq.len() != loci_per_group {
                    return Err(GenomeError::LengthMismatch {
                        group,
                        expected: loci_per_group,
                        found: seq.len(),
                    });
                }
            }
        }
        Ok(())
    }
}
