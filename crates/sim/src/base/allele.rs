use core::fmt;

use crate::errors::InvalidAllele;
use serde::{Deserialize, Serialize};

/// A single allele code at one locus.
///
/// `Allele` is a Copyable byte. Codes `0..=254` are ordinary allele values
/// (biallelic SNP barcodes use `0`/`1`); the reserved code `255` marks an
/// undefined allele, which is never allowed to enter the transmission
/// pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Allele(u8);

impl Allele {
    /// Reserved code for an undefined allele.
    pub const MISSING: Self = Self(u8::MAX);

    /// Largest code usable for a defined allele.
    pub const MAX_CODE: u8 = u8::MAX - 1;

    /// Create an allele from its code, or `None` if `code` is the reserved
    /// missing value.
    #[inline]
    pub const fn new(code: u8) -> Option<Self> {
        if code == u8::MAX {
            None
        } else {
            Some(Self(code))
        }
    }

    /// Return the raw byte code (`255` for missing).
    #[inline(always)]
    pub const fn code(self) -> u8 {
        self.0
    }

    /// Return `true` if this allele is undefined.
    #[inline(always)]
    pub const fn is_missing(self) -> bool {
        self.0 == u8::MAX
    }

    /// Parse a single text character. Digits map to their value, and
    /// `.`, `N`, `n` and `-` map to [`Allele::MISSING`].
    #[inline]
    pub const fn from_char(c: char) -> Result<Self, InvalidAllele> {
        match c {
            '0'..='9' => Ok(Self(c as u8 - b'0')),
            '.' | 'N' | 'n' | '-' => Ok(Self::MISSING),
            _ => Err(InvalidAllele(c)),
        }
    }
}

impl From<u8> for Allele {
    /// Raw conversion; `255` becomes [`Allele::MISSING`].
    #[inline]
    fn from(code: u8) -> Self {
        Self(code)
    }
}

impl From<Allele> for u8 {
    #[inline]
    fn from(allele: Allele) -> Self {
        allele.0
    }
}

impl fmt::Display for Allele {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_missing() {
            write!(f, ".")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
