//! Meiotic recombination inside a single oocyst.
//!
//! For every locus the bucket `[p1, p1, p2, p2]` is dealt to the four
//! offspring without replacement, independently of every other locus. There
//! is no crossover point: linkage between loci is not modelled.

use crate::base::Genotype;
use crate::errors::TransmissionError;
use rand::Rng;

/// The six distinct ways of dealing `[p1, p1, p2, p2]` to four offspring,
/// as the set of offspring that receive parent 1's allele.
///
/// A uniform shuffle of the 4-element bucket lands on each of these with
/// probability 4/24, so drawing an index uniformly from this table is the
/// same distribution with a single random draw per locus.
const PARENT1_RECIPIENTS: [[bool; 4]; 6] = [
    [true, true, false, false],
    [true, false, true, false],
    [true, false, false, true],
    [false, true, true, false],
    [false, true, false, true],
    [false, false, true, true],
];

/// Number of offspring produced by one meiosis.
pub const OFFSPRING_PER_MEIOSIS: usize = 4;

/// Recombine two parent genotypes into four offspring.
///
/// At each locus the four offspring together carry exactly two copies of
/// `parent1`'s allele and two of `parent2`'s. Identical parents (selfing)
/// are recombined all the same.
///
/// # Errors
/// Returns `ShapeMismatch` if the parents differ in length.
pub fn meiosis<R: Rng + ?Sized>(
    parent1: &Genotype,
    parent2: &Genotype,
    rng: &mut R,
) -> Result<[Genotype; OFFSPRING_PER_MEIOSIS], TransmissionError> {
    parent2.check_len(parent1.len())?;

    let n_loci = parent1.len();
    let mut offspring: [Genotype; OFFSPRING_PER_MEIOSIS] =
        std::array::from_fn(|_| Genotype::with_capacity(n_loci));

    for (&a1, &a2) in parent1.as_slice().iter().zip(parent2.as_slice()) {
        let recipients = &PARENT1_RECIPIENTS[rng.random_range(0..PARENT1_RECIPIENTS.len())];
        for (child, &from_parent1) in offspring.iter_mut().zip(recipients) {
            child.push(if from_parent1 { a1 } else { a2 });
        }
    }

    Ok(offspring)
}

/// Recombine two parents and append the four offspring to `out`.
///
/// `out` is left untouched on error.
pub fn meiosis_into<R: Rng + ?Sized>(
    parent1: &Genotype,
    parent2: &Genotype,
    out: &mut Vec<Genotype>,
    rng: &mut R,
) -> Result<(), TransmissionError> {
    out.extend(meiosis(parent1, parent2, rng)?);
    Ok(())
}
