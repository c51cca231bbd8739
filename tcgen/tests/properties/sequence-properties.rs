//! Arrays, strings, ordered sequences, permutations and grids.

use crate::init_logging;
use proptest::prelude::*;
use tcgen::prime::is_prime;
use tcgen::*;

proptest! {
    #[test]
    fn strictly_increasing_is_strict(seed in any::<u64>(), len in 0usize..60, upper in 60i64..500) {
        init_logging();
        let mut rng = Random::from_u64(seed);
        let mut seq = StrictlyIncreasing::new(len, Integer::range(1, upper).unwrap()).unwrap();
        let values = seq.val(&mut rng).unwrap();
        prop_assert_eq!(values.len(), len);
        prop_assert!(values.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(values.iter().all(|v| (1..=upper).contains(v)));
    }

    #[test]
    fn strictly_increasing_primes(seed in any::<u64>(), len in 0usize..25) {
        let mut rng = Random::from_u64(seed);
        let mut seq = StrictlyIncreasing::new(len, Prime::up_to(100).unwrap()).unwrap();
        let values = seq.val(&mut rng).unwrap();
        prop_assert_eq!(values.len(), len);
        prop_assert!(values.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(values.iter().all(|&p| is_prime(p)));
    }

    #[test]
    fn strictly_increasing_floats(seed in any::<u64>(), len in 0usize..1001) {
        let mut rng = Random::from_u64(seed);
        let mut seq = StrictlyIncreasing::new(len, Float::range(100, 110).unwrap()).unwrap();
        let values = seq.val(&mut rng).unwrap();
        prop_assert_eq!(values.len(), len);
        prop_assert!(values.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(values.iter().all(|&v| (100.0..=110.0).contains(&v)));
        prop_assert!(values.iter().all(|&v| (v * 100.0).round() / 100.0 == v));
    }

    #[test]
    fn strictly_increasing_needs_enough_values(len in 11usize..100) {
        let result = StrictlyIncreasing::new(len, Integer::range(1, 10).unwrap());
        prop_assert!(
            matches!(result, Err(TcgenError::Unsatisfiable { .. })),
            "{} distinct values cannot come from 10",
            len
        );
    }

    #[test]
    fn permutation_covers_every_label(seed in any::<u64>(), len in 0usize..200) {
        let mut rng = Random::from_u64(seed);
        let mut values = Permutation::new(len).unwrap().val(&mut rng).unwrap().to_vec();
        values.sort_unstable();
        prop_assert_eq!(values, (1..=len as i64).collect::<Vec<_>>());
    }

    #[test]
    fn non_decreasing_is_sorted(seed in any::<u64>(), len in 0usize..100, increasing in any::<bool>()) {
        let mut rng = Random::from_u64(seed);
        let seq = NonDecreasing::of(len, Integer::range(-50, 50).unwrap());
        let mut seq = if increasing { seq } else { seq.decreasing() };
        let values = seq.val(&mut rng).unwrap();
        prop_assert_eq!(values.len(), len);
        if increasing {
            prop_assert!(values.windows(2).all(|w| w[0] <= w[1]));
        } else {
            prop_assert!(values.windows(2).all(|w| w[0] >= w[1]));
        }
    }

    #[test]
    fn arrays_reproduce_under_a_fixed_seed(seed in any::<u64>()) {
        let run = |seed: u64| {
            let mut rng = Random::from_u64(seed);
            let first = Array::new(10).val(&mut rng).unwrap().to_vec();
            let second = Array::new(10)
                .with_params(&Params::new().arg(1e4))
                .unwrap()
                .val(&mut rng)
                .unwrap()
                .to_vec();
            (first, second)
        };
        let (first, second) = run(seed);
        prop_assert_eq!(first.len(), 10);
        prop_assert!(second.iter().all(|v| (1..=10_000).contains(v)));
        prop_assert_eq!(run(seed), (first, second));
    }

    #[test]
    fn text_uses_its_alphabet(seed in any::<u64>(), len in 0usize..100) {
        let mut rng = Random::from_u64(seed);
        let mut text = Text::with_charset(len, charset::ALPHANUMERIC).unwrap();
        let value = text.render(&mut rng).unwrap();
        prop_assert_eq!(value.len(), len);
        prop_assert!(value.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn grid_has_its_shape(seed in any::<u64>(), rows in 1usize..20, cols in 1usize..20) {
        let mut rng = Random::from_u64(seed);
        let mut grid = Grid::of(rows, cols, Char::new(".#").unwrap()).compact();
        let rendered = grid.render(&mut rng).unwrap();
        prop_assert_eq!(rendered.lines().count(), rows);
        prop_assert!(rendered.lines().all(|line| line.len() == cols));
    }
}

#[test]
fn array_add_draws_per_element() {
    init_logging();
    let mut rng = Random::from_u64(11);
    let mut array = Array::of(100, Integer::range(0, 0).unwrap());
    array.val(&mut rng).unwrap();

    let mut offset = Integer::range(1, 1_000_000).unwrap();
    array.add(Addend::Recipe(&mut offset), &mut rng).unwrap();
    let values = array.val(&mut rng).unwrap();
    assert!(values.iter().all(|v| (1..=1_000_000).contains(v)));
    assert!(values.windows(2).any(|w| w[0] != w[1]));
}

#[test]
fn array_reset_draws_new_length() {
    let mut rng = Random::from_u64(12);
    let mut array = Array::new(Integer::range(0, 1000).unwrap());
    let lengths: std::collections::HashSet<usize> = (0..20)
        .map(|_| {
            array.reset();
            array.val(&mut rng).unwrap().len()
        })
        .collect();
    assert!(lengths.len() > 1);
}
