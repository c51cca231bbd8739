//! Bounds, ranks, caching and weighting of the primitive descriptors.

use crate::init_logging;
use proptest::prelude::*;
use tcgen::prime::is_prime;
use tcgen::*;

proptest! {
    #[test]
    fn integer_respects_bounds(
        seed in any::<u64>(),
        lower in -1000i64..1000,
        span in 2i64..1000,
        inclusive in any::<bool>(),
    ) {
        init_logging();
        let mut rng = Random::from_u64(seed);
        let upper = lower + span;
        let recipe = Integer::range(lower, upper).unwrap();
        let mut recipe = if inclusive { recipe } else { recipe.exclusive() };
        let value = recipe.val(&mut rng).unwrap();
        if inclusive {
            prop_assert!((lower..=upper).contains(&value));
        } else {
            prop_assert!(lower < value && value < upper);
        }
    }

    #[test]
    fn integer_ranks_are_exact(lower in -1000i64..1000, span in 2i64..1000) {
        let upper = lower + span;
        let total = span as u128 + 1;
        let recipe = Integer::range(lower, upper).unwrap();
        prop_assert_eq!(recipe.total_values().unwrap(), total);
        prop_assert_eq!(recipe.kth_smallest(1).unwrap(), lower);
        prop_assert_eq!(recipe.kth_smallest(total).unwrap(), upper);
        prop_assert!(
            matches!(recipe.kth_smallest(total + 1), Err(TcgenError::RankOutOfRange { .. })),
            "rank past the end must fail"
        );

        let exclusive = recipe.exclusive();
        prop_assert_eq!(exclusive.total_values().unwrap(), total - 2);
        prop_assert_eq!(exclusive.kth_smallest(1).unwrap(), lower + 1);
        prop_assert_eq!(exclusive.kth_smallest(total - 2).unwrap(), upper - 1);
    }

    #[test]
    fn float_lands_on_grid(seed in any::<u64>(), places in 0u32..4, lower in -100i64..100) {
        let mut rng = Random::from_u64(seed);
        let mut recipe = Float::range(lower, lower + 10).unwrap().with_places(places).unwrap();
        let value = recipe.val(&mut rng).unwrap();
        prop_assert!(value >= lower as f64 && value <= (lower + 10) as f64);

        let rendered = recipe.render(&mut rng).unwrap();
        let decimals = rendered.split('.').nth(1).map_or(0, str::len);
        prop_assert_eq!(decimals, places as usize);
    }

    #[test]
    fn prime_is_prime_and_in_range(seed in any::<u64>(), lower in 1i64..10_000, span in 200i64..2000) {
        let mut rng = Random::from_u64(seed);
        let mut recipe = Prime::range(lower, lower + span).unwrap();
        let value = recipe.val(&mut rng).unwrap();
        prop_assert!(is_prime(value));
        prop_assert!((lower..=lower + span).contains(&value));
    }

    #[test]
    fn exclusive_primes_skip_prime_endpoints(seed in any::<u64>(), weight in prop::option::of(-20i64..20)) {
        let mut rng = Random::from_u64(seed);
        let recipe = Prime::range(2, 29).unwrap().exclusive();
        let recipe = match weight {
            Some(wcnt) => recipe.with_wcnt(wcnt),
            None => recipe,
        };
        let value = recipe.draw(&mut rng).unwrap();
        prop_assert!(is_prime(value));
        prop_assert!(value != 2 && value != 29);
        prop_assert!((3..=23).contains(&value));
    }

    #[test]
    fn weighted_primes_reach_ranked_extremes(seed in any::<u64>()) {
        let mut rng = Random::from_u64(seed);
        let recipe = Prime::range(1, 30).unwrap();
        let total = recipe.total_values().unwrap();
        let largest = recipe.kth_smallest(total).unwrap();
        let smallest = recipe.kth_smallest(1).unwrap();
        prop_assert_eq!((smallest, largest), (2, 29));
        prop_assert_eq!(recipe.clone().with_wcnt(400).draw(&mut rng).unwrap(), largest);
        prop_assert_eq!(recipe.with_wcnt(-400).draw(&mut rng).unwrap(), smallest);
    }

    #[test]
    fn val_is_cached_and_seeded(seed in any::<u64>()) {
        let mut first = Random::from_u64(seed);
        let mut second = Random::from_u64(seed);
        let mut a = Integer::default();
        let mut b = Integer::default();

        let value = a.val(&mut first).unwrap();
        prop_assert_eq!(a.val(&mut first).unwrap(), value);
        prop_assert_eq!(b.val(&mut second).unwrap(), value);

        a.reset();
        prop_assert!(!a.is_generated());
    }

    #[test]
    fn char_stays_in_alphabet(seed in any::<u64>(), wcnt in -20i64..20) {
        let mut rng = Random::from_u64(seed);
        let mut recipe = Char::new(charset::DIGITS).unwrap().with_wcnt(wcnt);
        prop_assert!(recipe.val(&mut rng).unwrap().is_ascii_digit());
    }
}

#[test]
fn empty_ranges_are_rejected() {
    init_logging();
    assert!(matches!(Integer::range(5, 4), Err(TcgenError::InvalidRange { .. })));
    assert!(matches!(
        Integer::range(4, 5).map(Integer::exclusive).and_then(|mut r| r.val(&mut Random::from_u64(0))),
        Err(TcgenError::InvalidRange { .. })
    ));
    assert!(matches!(
        Prime::range(24, 28).unwrap().val(&mut Random::from_u64(0)),
        Err(TcgenError::Unsatisfiable { .. })
    ));
    assert!(matches!(Char::new(""), Err(TcgenError::InvalidArgument { .. })));
}

#[test]
fn weighted_char_favours_priority_one() {
    init_logging();
    let mut rng = Random::from_u64(2024);
    let params = Params::new().char_set("#.").priority(vec![2, 1]).wcnt(10);
    let recipe = Char::from_params(&params).unwrap();
    let dots = (0..1000)
        .filter(|_| recipe.draw(&mut rng).unwrap() == '.')
        .count();
    assert!(dots > 500, "priority-1 symbol drawn {dots} times out of 1000");
}

#[test]
fn arithmetic_before_and_after_generation() {
    let mut rng = Random::from_u64(3);
    let shifted = match (Integer::range(1, 10).unwrap() + 5).unwrap() {
        Derived::Recipe(recipe) => recipe,
        Derived::Value(_) => panic!("ungenerated recipe should shift"),
    };
    assert_eq!((shifted.lower(), shifted.upper()), (6, 15));

    let mut generated = Integer::range(1, 10).unwrap();
    let value = generated.val(&mut rng).unwrap();
    assert_eq!((generated * 3).unwrap(), Derived::Value(value * 3));
}
