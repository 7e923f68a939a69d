use factorlib::{DisjointSet, FactorlibError};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

fn random_unions(n: usize, num_unions: usize, seed: u64) -> DisjointSet {
    let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
    let mut dset = DisjointSet::new(n);
    for _ in 0..num_unions {
        let x = rng.gen_range(0..n);
        let y = rng.gen_range(0..n);
        dset.union_set(x, y).unwrap();
    }
    dset
}

#[test]
fn isolation_baseline() {
    let mut dset = DisjointSet::new(17);
    assert_eq!(dset.num_elements(), 17);
    assert_eq!(dset.num_sets(), 17);
    for x in 0..17 {
        assert_eq!(dset.find_set(x).unwrap(), x);
    }
}

#[test]
fn find_idempotent() {
    let mut dset = random_unions(64, 40, 42);
    for x in 0..64 {
        let root = dset.find_set(x).unwrap();
        assert_eq!(dset.find_set(root).unwrap(), root);
    }
}

#[test]
fn union_coherence() {
    let mut rng = Xoshiro256StarStar::seed_from_u64(1);
    let mut dset = DisjointSet::new(32);
    for _ in 0..50 {
        let x = rng.gen_range(0..32);
        let y = rng.gen_range(0..32);
        // union reports exactly whether the pair was already joined
        let same = dset.is_same_set(x, y).unwrap();
        assert_eq!(dset.union_set(x, y).unwrap(), same);
        assert!(dset.is_same_set(x, y).unwrap());
    }
}

#[test]
fn union_reports_existing_connection() {
    let mut dset = DisjointSet::new(4);
    assert!(!dset.union_set(0, 1).unwrap());
    assert!(!dset.union_set(2, 3).unwrap());
    assert!(!dset.union_set(1, 3).unwrap());
    // 0 and 2 are already connected through 1-3
    assert!(dset.union_set(0, 2).unwrap());
    assert_eq!(dset.num_sets(), 1);
}

#[test]
fn link_prefers_higher_rank() {
    let mut dset = DisjointSet::new(3);
    // equal ranks: the second root wins and its rank grows
    let root = dset.link_set(0, 1);
    assert_eq!(root, 1);
    // rank 1 vs rank 0: the higher-ranked root stays
    assert_eq!(dset.link_set(root, 2), root);
    assert_eq!(dset.find_set(2).unwrap(), root);
}

#[test]
fn labeling_contiguous() {
    let mut dset = random_unions(40, 25, 7);
    let mut labels = vec![0; 40];
    let k = dset.unique_labeling(&mut labels).unwrap();
    assert_eq!(k, dset.num_sets());
    // labels cover [0, k) exactly
    let mut seen = vec![false; k];
    for &label in &labels {
        assert!(label < k);
        seen[label] = true;
    }
    assert!(seen.iter().all(|s| *s));
    // same set iff same label
    for x in 0..40 {
        for y in 0..40 {
            assert_eq!(labels[x] == labels[y], dset.is_same_set(x, y).unwrap());
        }
    }
}

#[test]
fn labeling_follows_first_root_order() {
    let mut dset = DisjointSet::new(5);
    dset.union_set(3, 4).unwrap();
    let mut labels = vec![0; 5];
    assert_eq!(dset.unique_labeling(&mut labels).unwrap(), 4);
    assert_eq!(labels, vec![0, 1, 2, 3, 3]);
}

#[test]
fn out_of_range_rejected() {
    let mut dset = DisjointSet::new(3);
    assert!(matches!(
        dset.find_set(3),
        Err(FactorlibError::IndexOutOfRange { .. })
    ));
    assert!(matches!(
        dset.union_set(0, 7),
        Err(FactorlibError::IndexOutOfRange { .. })
    ));
    assert!(matches!(
        dset.is_same_set(9, 0),
        Err(FactorlibError::IndexOutOfRange { .. })
    ));
}

#[test]
fn labeling_wrong_length_rejected() {
    let mut dset = DisjointSet::new(3);
    let mut labels = vec![0; 2];
    assert!(matches!(
        dset.unique_labeling(&mut labels),
        Err(FactorlibError::DimensionMismatch { .. })
    ));
}

#[test]
fn connected_is_a_memo() {
    let mut dset = DisjointSet::new(2);
    dset.union_set(0, 1).unwrap();
    // never derived from the forest, only set by the owner
    assert!(!dset.connected());
    dset.set_connected(true);
    assert!(dset.connected());
}

#[test]
fn empty_universe() {
    let mut dset = DisjointSet::new(0);
    assert_eq!(dset.num_sets(), 0);
    assert!(matches!(
        dset.find_set(0),
        Err(FactorlibError::IndexOutOfRange { .. })
    ));
}
