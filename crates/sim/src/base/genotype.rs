use std::fmt;
use std::str::FromStr;

use super::Allele;
use crate::errors::{InvalidAllele, TransmissionError};
use serde::{Deserialize, Serialize};

/// A parasite genotype: one allele per tracked locus.
///
/// Genotypes compare, hash and order lexicographically by allele code, which
/// is what deduplication relies on. Two genotypes are equal iff every locus
/// matches.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Genotype {
    alleles: Vec<Allele>,
}

impl Genotype {
    /// Create an empty genotype (zero loci).
    pub fn new() -> Self {
        Self {
            alleles: Vec::new(),
        }
    }

    /// Create an empty genotype with reserved capacity for `n_loci` loci.
    pub fn with_capacity(n_loci: usize) -> Self {
        Self {
            alleles: Vec::with_capacity(n_loci),
        }
    }

    /// Create a genotype from a vector of alleles.
    pub fn from_alleles(alleles: Vec<Allele>) -> Self {
        Self { alleles }
    }

    /// Create a genotype from raw byte codes (`255` is missing).
    pub fn from_codes(codes: &[u8]) -> Self {
        Self {
            alleles: codes.iter().copied().map(Allele::from).collect(),
        }
    }

    /// Create a genotype from optional codes, mapping `None` to a missing allele.
    pub fn from_optional(codes: &[Option<u8>]) -> Self {
        Self {
            alleles: codes
                .iter()
                .map(|c| c.and_then(Allele::new).unwrap_or(Allele::MISSING))
                .collect(),
        }
    }

    /// Number of loci.
    #[inline]
    pub fn len(&self) -> usize {
        self.alleles.len()
    }

    /// Return `true` if the genotype tracks no loci.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.alleles.is_empty()
    }

    /// Allele at `locus`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, locus: usize) -> Option<Allele> {
        self.alleles.get(locus).copied()
    }

    /// Borrow the alleles as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Allele] {
        &self.alleles
    }

    /// Append an allele.
    #[inline]
    pub fn push(&mut self, allele: Allele) {
        self.alleles.push(allele);
    }

    /// Raw byte codes, one per locus.
    pub fn codes(&self) -> Vec<u8> {
        self.alleles.iter().map(|a| a.code()).collect()
    }

    /// Index of the first undefined allele, if any.
    pub fn first_missing(&self) -> Option<usize> {
        self.alleles.iter().position(|a| a.is_missing())
    }

    /// Return `true` if any locus is undefined.
    #[inline]
    pub fn has_missing(&self) -> bool {
        self.first_missing().is_some()
    }

    /// Fail with `ShapeMismatch` unless `self` has exactly `n_loci` loci.
    pub fn check_len(&self, n_loci: usize) -> Result<(), TransmissionError> {
        if self.len() == n_loci {
            Ok(())
        } else {
            Err(TransmissionError::ShapeMismatch {
                expected: n_loci,
                found: self.len(),
            })
        }
    }
}

impl From<Vec<u8>> for Genotype {
    fn from(codes: Vec<u8>) -> Self {
        Self::from_codes(&codes)
    }
}

impl FromIterator<Allele> for Genotype {
    fn from_iter<I: IntoIterator<Item = Allele>>(iter: I) -> Self {
        Self {
            alleles: iter.into_iter().collect(),
        }
    }
}

impl AsRef<[Allele]> for Genotype {
    fn as_ref(&self) -> &[Allele] {
        &self.alleles
    }
}

/// Compact text form: a digit per locus (`"01101"`) when every code fits in
/// one digit, otherwise comma separated (`"0,12,3"`). Missing alleles print as `.`.
impl fmt::Display for Genotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let compact = self
            .alleles
            .iter()
            .all(|a| a.is_missing() || a.code() < 10);
        for (i, allele) in self.alleles.iter().enumerate() {
            if !compact && i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{allele}")?;
        }
        Ok(())
    }
}

impl FromStr for Genotype {
    type Err = InvalidAllele;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !s.contains(',') {
            return s.chars().map(Allele::from_char).collect();
        }

        s.split(',')
            .map(|token| {
                let token = token.trim();
                match token.parse::<u8>() {
                    Ok(code) => Ok(Allele::from(code)),
                    Err(_) => {
                        let mut chars = token.chars();
                        match (chars.next(), chars.next()) {
                            (Some(c), None) => Allele::from_char(c),
                            (Some(c), Some(_)) => Err(InvalidAllele(c)),
                            (None, _) => Err(InvalidAllele(',')),
                        }
                    }
                }
            })
            .collect()
    }
}
