//! Property-based tests using proptest.
//!
//! These check the invariants of each stage over arbitrary genotype pools:
//!   - meiosis keeps exactly two copies of each parent's allele per locus
//!   - oocyst offspring come in broods of four
//!   - sporozoites are distinct members of the oocyst-offspring pool

use proptest::prelude::*;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use sporogony_sim::prelude::*;
use sporogony_sim::transmission::OocystOffspringGenerator;

fn pool_strategy() -> impl Strategy<Value = GenotypePool> {
    (1usize..8, 0usize..40).prop_flat_map(|(n_strains, n_loci)| {
        prop::collection::vec(prop::collection::vec(0u8..4, n_loci), n_strains)
            .prop_map(|rows| GenotypePool::from_rows(&rows).unwrap())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_meiosis_preserves_allele_multiset(
        (parent1, parent2) in (0usize..60).prop_flat_map(|n| (
            prop::collection::vec(0u8..=254, n),
            prop::collection::vec(0u8..=254, n),
        )),
        seed in any::<u64>(),
    ) {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let p1 = Genotype::from(parent1);
        let p2 = Genotype::from(parent2);
        let offspring = meiosis(&p1, &p2, &mut rng).unwrap();

        for child in &offspring {
            prop_assert_eq!(child.len(), p1.len());
        }
        for locus in 0..p1.len() {
            let mut column: Vec<u8> = offspring.iter().map(|g| g.codes()[locus]).collect();
            column.sort_unstable();
            let (a, b) = (p1.codes()[locus], p2.codes()[locus]);
            let mut expected = vec![a, a, b, b];
            expected.sort_unstable();
            prop_assert_eq!(column, expected);
        }
    }

    #[test]
    fn prop_meiosis_rejects_mismatched_parents(
        n1 in 0usize..20,
        n2 in 0usize..20,
        seed in any::<u64>(),
    ) {
        prop_assume!(n1 != n2);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let result = meiosis(&Genotype::from(vec![0; n1]), &Genotype::from(vec![1; n2]), &mut rng);
        let is_shape_mismatch = matches!(result, Err(TransmissionError::ShapeMismatch { .. }));
        prop_assert!(is_shape_mismatch);
    }

    #[test]
    fn prop_oocyst_offspring_size(pool in pool_strategy(), seed in any::<u64>()) {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let result = OocystOffspringGenerator::default()
            .generate_detailed(&pool, &mut rng)
            .unwrap();

        match result.n_oocysts {
            None => {
                prop_assert_eq!(pool.len(), 1);
                prop_assert_eq!(&result.pool, &pool);
            }
            Some(n_oocysts) => {
                prop_assert!(pool.len() >= 2);
                prop_assert!(n_oocysts >= 1);
                prop_assert_eq!(result.pool.len(), 4 * n_oocysts);
                prop_assert_eq!(result.pool.n_loci(), pool.n_loci());
            }
        }
    }

    #[test]
    fn prop_sporozoites_are_distinct_members(pool in pool_strategy(), seed in any::<u64>()) {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let sporozoites = sample_sporozoites(&pool, &mut rng).unwrap();

        prop_assert!(!sporozoites.is_empty());
        prop_assert!(sporozoites.len() <= pool.n_distinct());
        prop_assert!(sporozoites.iter().all(|g| pool.contains(g)));
        prop_assert!(sporozoites.genotypes().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn prop_transmit_output_within_gametocyte_alleles(pool in pool_strategy(), seed in any::<u64>()) {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let sporozoites = transmit(&pool, None, &mut rng).unwrap();

        for genotype in &sporozoites {
            for (locus, allele) in genotype.as_slice().iter().enumerate() {
                let present = pool.iter().any(|g| g.get(locus) == Some(*allele));
                prop_assert!(present);
            }
        }
    }
}
