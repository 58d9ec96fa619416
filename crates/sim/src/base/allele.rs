use core::fmt;

use crate::errors::InvalidAllele;
use serde::{Deserialize, Serialize};

/// Allelic state at a single SNP locus.
///
/// `Allele` is a compact, `Copy` representation backed by a single byte. The
/// mapping of variants to integers is stable and used throughout the crate
/// (Wild=0, Crop=1), so the integer value doubles as the crop-allele dosage
/// contributed by one homolog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Allele {
    #[default]
    Wild = 0,
    Crop = 1,
}

impl Allele {
    /// Convert from u8 index (0-1)
    #[inline(always)]
    pub const fn from_index(idx: u8) -> Option<Self> {
        match idx {
            0 => Some(Self::Wild),
            1 => Some(Self::Crop),
            _ => None,
        }
    }

    /// Convert to the compact u8 index (0-1).
    #[inline(always)]
    pub const fn to_index(self) -> u8 {
        self as u8
    }

    /// Crop-allele dosage contributed by this allele (0 or 1).
    #[inline(always)]
    pub const fn dosage(self) -> u32 {
        self as u32
    }

    /// Convert from an ASCII digit (`b'0'` or `b'1'`).
    #[inline]
    pub const fn from_ascii(byte: u8) -> Option<Self> {
        match byte {
            b'0' => Some(Self::Wild),
            b'1' => Some(Self::Crop),
            _ => None,
        }
    }

    /// Convert to an ASCII digit.
    #[inline(always)]
    pub const fn to_ascii(self) -> u8 {
        match self {
            Self::Wild => b'0',
            Self::Crop => b'1',
        }
    }

    #[inline(always)]
    pub const fn to_char(self) -> char {
        self.to_ascii() as char
    }

    #[inline(always)]
    pub const fn is_crop(self) -> bool {
        matches!(self, Self::Crop)
    }
}

impl TryFrom<u8> for Allele {
    type Error = InvalidAllele;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Self::from_ascii(byte).ok_or(InvalidAllele(byte))
    }
}

impl From<Allele> for u8 {
    #[inline(always)]
    fn from(allele: Allele) -> u8 {
        allele.to_index()
    }
}

impl From<Allele> for char {
    #[inline(always)]
    fn from(allele: Allele) -> char {
        allele.to_char()
    }
}

impl fmt::Display for Allele {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
