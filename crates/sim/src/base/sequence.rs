use super::Allele;
use crate::errors::InvalidSequence;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed-length sequence of alleles for one homolog of one linkage group.
///
/// The length is set at construction and never changes: all in-place
/// operations (`copy_from`, `splice_from`, `fill`) write into the existing
/// buffer and require operands of the same length. This lets the simulation
/// engine reuse allocations across generations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlleleSequence(Vec<Allele>);

impl AlleleSequence {
    /// Create a sequence of `len` copies of `allele`.
    ///
    /// ```rust
    /// # use cropwild_sim::base::{AlleleSequence, Allele};
    /// let seq = AlleleSequence::uniform(Allele::Wild, 5);
    /// assert_eq!(seq.len(), 5);
    /// assert_eq!(seq.crop_count(), 0);
    /// ```
    pub fn uniform(allele: Allele, len: usize) -> Self {
        Self(vec![allele; len])
    }

    /// All-wild sequence of length `len`.
    pub fn wild(len: usize) -> Self {
        Self::uniform(Allele::Wild, len)
    }

    /// All-crop sequence of length `len`.
    pub fn crop(len: usize) -> Self {
        Self::uniform(Allele::Crop, len)
    }

    pub fn from_alleles(alleles: Vec<Allele>) -> Self {
        Self(alleles)
    }

    /// Build a sequence by joining `prefix[..point]` with `suffix[point..]`.
    ///
    /// # Panics
    /// Panics if the operands differ in length or `point` exceeds it.
    pub fn spliced(prefix: &Self, suffix: &Self, point: usize) -> Self {
        let mut out = prefix.clone();
        out.splice_from(prefix, suffix, point);
        out
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the allele at `locus`, or `None` if out of range.
    #[inline]
    pub fn get(&self, locus: usize) -> Option<Allele> {
        self.0.get(locus).copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Allele] {
        &self.0
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Allele] {
        &mut self.0
    }

    /// Number of crop alleles carried by this homolog.
    pub fn crop_count(&self) -> usize {
        self.0.iter().filter(|a| a.is_crop()).count()
    }

    /// Return true if every locus carries `allele`.
    pub fn is_uniform(&self, allele: Allele) -> bool {
        self.0.iter().all(|&a| a == allele)
    }

    /// Overwrite every locus with `allele`.
    #[inline]
    pub fn fill(&mut self, allele: Allele) {
        self.0.fill(allele);
    }

    /// Overwrite this sequence with the contents of `other`.
    ///
    /// # Panics
    /// Panics if the lengths differ.
    #[inline]
    pub fn copy_from(&mut self, other: &Self) {
        self.0.copy_from_slice(&other.0);
    }

    /// Overwrite this sequence with `prefix[..point]` followed by
    /// `suffix[point..]`.
    ///
    /// # Panics
    /// Panics if the three sequences differ in length or `point > len`.
    #[inline]
    pub fn splice_from(&mut self, prefix: &Self, suffix: &Self, point: usize) {
        self.0[..point].copy_from_slice(&prefix.0[..point]);
        self.0[point..].copy_from_slice(&suffix.0[point..]);
    }
}

impl fmt::Display for AlleleSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &allele in &self.0 {
            write!(f, "{}", allele.to_char())?;
        }
        Ok(())
    }
}

impl FromStr for AlleleSequence {
    type Err = InvalidSequence;

    /// Parse a string of '0' (wild) and '1' (crop) characters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(InvalidSequence::EmptySequence);
        }
        let data: Result<Vec<Allele>, _> = s
            .chars()
            .map(|c| {
                u8::try_from(c)
                    .ok()
                    .and_then(Allele::from_ascii)
                    .ok_or(InvalidSequence::InvalidChar(c))
            })
            .collect();

        Ok(Self(data?))
    }
}
