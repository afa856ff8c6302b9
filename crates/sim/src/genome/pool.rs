//! Genotype pools.
//!
//! A `GenotypePool` is an ordered collection of equal-length genotypes. The
//! same type carries the gametocyte pool entering the mosquito, the
//! oocyst-offspring pool (duplicates allowed) and the deduplicated
//! sporozoite pool.

use crate::base::{Allele, Genotype};
use crate::errors::TransmissionError;
use rand::Rng;
use rand_distr::{Bernoulli, Distribution};
use serde::{Deserialize, Serialize};

/// An ordered collection of genotypes sharing one locus count.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Genotype>", into = "Vec<Genotype>")]
pub struct GenotypePool {
    /// Genotypes in insertion order
    genotypes: Vec<Genotype>,
    /// Locus count shared by every genotype
    n_loci: usize,
}

impl GenotypePool {
    /// Create an empty pool whose genotypes will have `n_loci` loci.
    pub fn with_loci(n_loci: usize) -> Self {
        Self {
            genotypes: Vec::new(),
            n_loci,
        }
    }

    /// Create an empty pool with reserved capacity.
    pub fn with_capacity(n_loci: usize, capacity: usize) -> Self {
        Self {
            genotypes: Vec::with_capacity(capacity),
            n_loci,
        }
    }

    /// Create a pool from genotypes, checking that all share the length of
    /// the first one.
    ///
    /// # Errors
    /// Returns `ShapeMismatch` if any genotype differs in length.
    pub fn from_genotypes(genotypes: Vec<Genotype>) -> Result<Self, TransmissionError> {
        let n_loci = genotypes.first().map_or(0, Genotype::len);
        for genotype in &genotypes {
            genotype.check_len(n_loci)?;
        }
        Ok(Self { genotypes, n_loci })
    }

    /// Create a pool from rows of raw allele codes.
    pub fn from_rows<T: AsRef<[u8]>>(rows: &[T]) -> Result<Self, TransmissionError> {
        Self::from_genotypes(
            rows.iter()
                .map(|row| Genotype::from_codes(row.as_ref()))
                .collect(),
        )
    }

    /// Create a pool of a single genotype.
    pub fn single(genotype: Genotype) -> Self {
        Self {
            n_loci: genotype.len(),
            genotypes: vec![genotype],
        }
    }

    /// Generate `n_strains` random biallelic genotypes of `n_loci` loci,
    /// each allele independently `1` with probability `p`.
    ///
    /// # Errors
    /// Returns `InvalidParameter` if `p` is outside [0.0, 1.0].
    pub fn random_biallelic<R: Rng + ?Sized>(
        n_strains: usize,
        n_loci: usize,
        p: f64,
        rng: &mut R,
    ) -> Result<Self, TransmissionError> {
        let coin = Bernoulli::new(p).map_err(|_| {
            TransmissionError::InvalidParameter(format!(
                "allele frequency {p} (must be between 0.0 and 1.0)"
            ))
        })?;

        let genotypes = (0..n_strains)
            .map(|_| {
                (0..n_loci)
                    .map(|_| {
                        let bit: bool = coin.sample(rng);
                        Allele::from(u8::from(bit))
                    })
                    .collect()
            })
            .collect();

        Ok(Self { genotypes, n_loci })
    }

    /// Number of genotypes.
    #[inline]
    pub fn len(&self) -> usize {
        self.genotypes.len()
    }

    /// Return `true` if the pool holds no genotypes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.genotypes.is_empty()
    }

    /// Locus count shared by every genotype in the pool.
    #[inline]
    pub fn n_loci(&self) -> usize {
        self.n_loci
    }

    /// Genotype at `index`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Genotype> {
        self.genotypes.get(index)
    }

    /// Borrow the genotypes as a slice.
    #[inline]
    pub fn genotypes(&self) -> &[Genotype] {
        &self.genotypes
    }

    /// Iterate over the genotypes.
    pub fn iter(&self) -> std::slice::Iter<'_, Genotype> {
        self.genotypes.iter()
    }

    /// Consume the pool, returning its genotypes.
    pub fn into_genotypes(self) -> Vec<Genotype> {
        self.genotypes
    }

    /// Append a genotype.
    ///
    /// # Errors
    /// Returns `ShapeMismatch` if its length differs from the pool's.
    pub fn push(&mut self, genotype: Genotype) -> Result<(), TransmissionError> {
        genotype.check_len(self.n_loci)?;
        self.genotypes.push(genotype);
        Ok(())
    }

    /// Append genotypes that are already known to have `n_loci` loci.
    pub(crate) fn extend_unchecked<I: IntoIterator<Item = Genotype>>(&mut self, genotypes: I) {
        self.genotypes.extend(genotypes);
        debug_assert!(self.genotypes.iter().all(|g| g.len() == self.n_loci));
    }

    /// Return `true` if an equal genotype is in the pool.
    pub fn contains(&self, genotype: &Genotype) -> bool {
        self.genotypes.contains(genotype)
    }

    /// Position of the first undefined allele as `(genotype index, locus)`.
    pub fn first_missing(&self) -> Option<(usize, usize)> {
        self.genotypes
            .iter()
            .enumerate()
            .find_map(|(i, g)| g.first_missing().map(|locus| (i, locus)))
    }

    /// Return `true` if any genotype has an undefined allele.
    #[inline]
    pub fn has_missing(&self) -> bool {
        self.first_missing().is_some()
    }

    /// The distinct genotypes of this pool, sorted lexicographically.
    pub fn distinct(&self) -> Self {
        let mut genotypes = self.genotypes.clone();
        genotypes.sort_unstable();
        genotypes.dedup();
        Self {
            genotypes,
            n_loci: self.n_loci,
        }
    }

    /// Number of distinct genotypes.
    pub fn n_distinct(&self) -> usize {
        self.distinct().len()
    }
}

impl TryFrom<Vec<Genotype>> for GenotypePool {
    type Error = TransmissionError;

    fn try_from(genotypes: Vec<Genotype>) -> Result<Self, Self::Error> {
        Self::from_genotypes(genotypes)
    }
}

impl From<GenotypePool> for Vec<Genotype> {
    fn from(pool: GenotypePool) -> Self {
        pool.genotypes
    }
}

impl<'a> IntoIterator for &'a GenotypePool {
    type Item = &'a Genotype;
    type IntoIter = std::slice::Iter<'a, Genotype>;

    fn into_iter(self) -> Self::IntoIter {
        self.genotypes.iter()
    }
}
