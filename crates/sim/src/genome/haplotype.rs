use crate::base::{Allele, AlleleSequence};

/// A haplotype: one homolog of every linkage group, in linkage-group order.
///
/// Every individual carries two haplotypes. A gamete produced by meiosis has
/// exactly the same shape, so it is represented by the same type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Haplotype {
    groups: Vec<AlleleSequence>,
}

/// Haploid product of meiosis: one allele sequence per linkage group.
pub type Gamete = Haplotype;

impl Haplotype {
    /// Create a haplotype of `linkage_groups` homologs, each `loci_per_group`
    /// copies of `allele`.
    pub fn uniform(allele: Allele, linkage_groups: usize, loci_per_group: usize) -> Self {
        Self {
            groups: (0..linkage_groups)
                .map(|_| AlleleSequence::uniform(allele, loci_per_group))
                .collect(),
        }
    }

    /// Pure crop haplotype: the pollen contribution of a crop parent.
    pub fn crop(linkage_groups: usize, loci_per_group: usize) -> Self {
        Self::uniform(Allele::Crop, linkage_groups, loci_per_group)
    }

    pub fn from_groups(groups: Vec<AlleleSequence>) -> Self {
        Self { groups }
    }

    /// Number of linkage groups.
    #[inline]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    #[inline]
    pub fn get(&self, group: usize) -> Option<&AlleleSequence> {
        self.groups.get(group)
    }

    #[inline]
    pub fn get_mut(&mut self, group: usize) -> Option<&mut AlleleSequence> {
        self.groups.get_mut(group)
    }

    #[inline]
    pub fn groups(&self) -> &[AlleleSequence] {
        &self.groups
    }

    #[inline]
    pub fn groups_mut(&mut self) -> &mut [AlleleSequence] {
        &mut self.groups
    }

    /// Overwrite every locus of every linkage group with `allele`.
    pub fn fill(&mut self, allele: Allele) {
        for seq in &mut self.groups {
            seq.fill(allele);
        }
    }

    /// Total number of crop alleles across all linkage groups.
    pub fn crop_count(&self) -> usize {
        self.groups.iter().map(AlleleSequence::crop_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_haplotype_shape() {
        let hap = Haplotype::uniform(Allele::Wild, 3, 7);
        assert_eq!(hap.len(), 3);
        assert!(hap.groups().iter().all(|g| g.len() == 7));
        assert_eq!(hap.crop_count(), 0);
    }

    #[test]
    fn test_crop_haplotype() {
        let hap = Haplotype::crop(2, 5);
        assert_eq!(hap.crop_count(), 10);
        assert!(hap.groups().iter().all(|g| g.is_uniform(Allele::Crop)));
    }

    #[test]
    fn test_fill_and_get() {
        let mut hap = Haplotype::crop(2, 4);
        hap.fill(Allele::Wild);
        assert_eq!(hap.crop_count(), 0);
        assert!(hap.get(1).is_some());
        assert!(hap.get(2).is_none());
    }
}
