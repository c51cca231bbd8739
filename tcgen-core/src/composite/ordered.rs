//! Sequences with an ordering constraint on their elements.

use super::{fill, Array, Count};
use crate::{
    error::*,
    fenwick::Fenwick,
    primitive::{Integer, Ranked},
    random::Random,
    render::Descriptor,
};
use log::debug;
use rand::Rng;
use std::{cmp::Ordering, collections::HashSet};

/// Largest rank universe sampled through a dense [`Fenwick`] tree.
const DENSE_LIMIT: u128 = 1 << 20;

fn ascending<T: PartialOrd>(a: &T, b: &T) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

/// Independent draws sorted ascending, or descending when not `increasing`.
#[derive(Debug, Clone, PartialEq)]
pub struct NonDecreasing<P: Ranked = Integer> {
    array: Array<P>,
    increasing: bool,
}

impl NonDecreasing<Integer> {
    pub fn new(count: impl Into<Count>) -> Self {
        NonDecreasing::of(count, Integer::default())
    }
}

impl<P: Ranked> NonDecreasing<P> {
    pub fn of(count: impl Into<Count>, recipe: P) -> Self {
        NonDecreasing {
            array: Array::of(count, recipe),
            increasing: true,
        }
    }

    /// Sort largest first instead.
    pub fn decreasing(mut self) -> Self {
        self.increasing = false;
        self
    }

    /// Whether values are sorted smallest first.
    pub fn is_increasing(&self) -> bool {
        self.increasing
    }

    pub fn val(&mut self, rng: &mut Random) -> Result<&[P::Value]> {
        self.generate(rng)?;
        self.array.val(rng)
    }

    fn generate(&mut self, rng: &mut Random) -> Result<()> {
        let increasing = self.increasing;
        let Array {
            count,
            recipe,
            cache,
        } = &mut self.array;
        cache.get_or_try_init(|| {
            let mut values = fill(count, recipe, rng)?;
            if increasing {
                values.sort_by(ascending);
            } else {
                values.sort_by(|a, b| ascending(b, a));
            }
            Ok(values)
        })?;
        Ok(())
    }
}

/// `N` distinct values of a ranked recipe in ascending order.
#[derive(Debug, Clone, PartialEq)]
pub struct StrictlyIncreasing<P: Ranked = Integer> {
    array: Array<P>,
    len: usize,
}

impl<P: Ranked> StrictlyIncreasing<P> {
    /// Fails with `Unsatisfiable` if the recipe has fewer than `len` values.
    pub fn new(len: usize, recipe: P) -> Result<Self> {
        let total = recipe.total_values()?;
        if len as u128 > total {
            return Err(TcgenError::unsatisfiable(format!(
                "cannot pick {len} distinct values from {total}"
            )));
        }
        Ok(StrictlyIncreasing {
            array: Array::of(len, recipe),
            len,
        })
    }

    pub fn val(&mut self, rng: &mut Random) -> Result<&[P::Value]> {
        self.generate(rng)?;
        self.array.val(rng)
    }

    fn generate(&mut self, rng: &mut Random) -> Result<()> {
        let len = self.len;
        let Array { recipe, cache, .. } = &mut self.array;
        cache.get_or_try_init(|| {
            let total = recipe.total_values()?;
            let mut ranks = distinct_ranks(rng, len, total)?;
            ranks.sort_unstable();
            ranks.into_iter().map(|rank| recipe.kth_smallest(rank)).collect()
        })?;
        Ok(())
    }
}

/// `count` ranks drawn uniformly without replacement from `1..=total`.
fn distinct_ranks(rng: &mut Random, count: usize, total: u128) -> Result<Vec<u128>> {
    if count as u128 > total {
        return Err(TcgenError::unsatisfiable(format!(
            "cannot pick {count} distinct values from {total}"
        )));
    }

    if total <= DENSE_LIMIT {
        debug!("Selecting {count} of {total} ranks with an order-statistics tree");
        let mut alive = Fenwick::new(total as usize);
        let mut ranks = Vec::with_capacity(count);
        for _ in 0..count {
            let pick = rng.gen_range(1..=alive.remaining());
            let rank = alive
                .find_kth(pick)
                .ok_or_else(|| TcgenError::unsatisfiable("rank universe exhausted"))?;
            alive.remove(rank);
            ranks.push(rank as u128);
        }
        return Ok(ranks);
    }

    // Floyd's subset sampling: uniform over all `count`-subsets.
    debug!("Selecting {count} of {total} ranks by subset sampling");
    let mut chosen = HashSet::with_capacity(count);
    let mut ranks = Vec::with_capacity(count);
    for upper in (total - count as u128 + 1)..=total {
        let pick = rng.gen_range(1..=upper);
        let rank = if chosen.contains(&pick) { upper } else { pick };
        chosen.insert(rank);
        ranks.push(rank);
    }
    Ok(ranks)
}

/// A uniformly shuffled permutation of `1..=N`.
#[derive(Debug, Clone, PartialEq)]
pub struct Permutation {
    array: Array<Integer>,
    len: usize,
}

impl Permutation {
    pub fn new(len: usize) -> Result<Self> {
        let recipe = Integer::range(1, len.max(1))?;
        Ok(Permutation {
            array: Array::of(len, recipe),
            len,
        })
    }

    pub fn val(&mut self, rng: &mut Random) -> Result<&[i64]> {
        self.generate(rng)?;
        self.array.val(rng)
    }

    fn generate(&mut self, rng: &mut Random) -> Result<()> {
        if self.array.is_generated() {
            return Ok(());
        }
        let recipe = &self.array.recipe;
        let mut values = (1..=self.len as u128)
            .map(|k| recipe.kth_smallest(k))
            .collect::<Result<Vec<_>>>()?;
        rng.shuffle(&mut values);
        self.array.cache.set(values);
        Ok(())
    }
}

macro_rules! ordered_descriptor {
    ($($name:ident $(<$param:ident: $bound:ident>)?),*) => {
        $(
            impl$(<$param: $bound>)? Descriptor for $name$(<$param>)? {
                fn render(&mut self, rng: &mut Random) -> Result<String> {
                    self.generate(rng)?;
                    self.array.render(rng)
                }

                fn is_generated(&self) -> bool {
                    self.array.is_generated()
                }

                fn reset(&mut self) {
                    self.array.reset();
                }
            }
        )*
    };
}

ordered_descriptor!(NonDecreasing<P: Ranked>, StrictlyIncreasing<P: Ranked>, Permutation);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prime::is_prime;
    use crate::primitive::{Float, Prime};

    #[test]
    fn test_non_decreasing() {
        let mut rng = Random::from_u64(0);
        let mut up = NonDecreasing::of(50, Integer::range(1, 10).unwrap());
        assert!(up.val(&mut rng).unwrap().windows(2).all(|w| w[0] <= w[1]));

        let mut down = NonDecreasing::of(50, Float::range(0, 1).unwrap()).decreasing();
        assert!(down.val(&mut rng).unwrap().windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(down.render(&mut rng).unwrap().split(' ').count(), 50);
    }

    #[test]
    fn test_strictly_increasing_integers() {
        let mut rng = Random::from_u64(1);
        let mut seq = StrictlyIncreasing::new(20, Integer::range(1, 25).unwrap()).unwrap();
        let values = seq.val(&mut rng).unwrap();
        assert_eq!(values.len(), 20);
        assert!(values.windows(2).all(|w| w[0] < w[1]));
        assert!(values.iter().all(|v| (1..=25).contains(v)));

        let mut all = StrictlyIncreasing::new(10, Integer::range(1, 10).unwrap()).unwrap();
        assert_eq!(all.val(&mut rng).unwrap(), (1..=10).collect::<Vec<i64>>().as_slice());
    }

    #[test]
    fn test_strictly_increasing_primes() {
        let mut rng = Random::from_u64(2);
        let mut seq = StrictlyIncreasing::new(10, Prime::range(1, 100).unwrap()).unwrap();
        let values = seq.val(&mut rng).unwrap();
        assert!(values.windows(2).all(|w| w[0] < w[1]));
        assert!(values.iter().all(|&p| is_prime(p)));

        assert!(matches!(
            StrictlyIncreasing::new(26, Prime::range(1, 100).unwrap()),
            Err(TcgenError::Unsatisfiable { .. })
        ));
    }

    #[test]
    fn test_strictly_increasing_large_universe() {
        let mut rng = Random::from_u64(3);
        let mut seq = StrictlyIncreasing::new(100, Integer::range(1, 1e15).unwrap()).unwrap();
        let values = seq.val(&mut rng).unwrap();
        assert_eq!(values.len(), 100);
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_distinct_ranks() {
        let mut rng = Random::from_u64(4);
        let mut ranks = distinct_ranks(&mut rng, 5, 5).unwrap();
        ranks.sort_unstable();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
        assert!(distinct_ranks(&mut rng, 6, 5).is_err());
        assert!(distinct_ranks(&mut rng, 0, 0).unwrap().is_empty());

        let sparse = distinct_ranks(&mut rng, 50, DENSE_LIMIT * 4).unwrap();
        let unique: HashSet<u128> = sparse.iter().copied().collect();
        assert_eq!(unique.len(), 50);
    }

    #[test]
    fn test_permutation() {
        let mut rng = Random::from_u64(5);
        let mut perm = Permutation::new(30).unwrap();
        let mut values = perm.val(&mut rng).unwrap().to_vec();
        assert_eq!(perm.val(&mut rng).unwrap(), values.as_slice());
        values.sort_unstable();
        assert_eq!(values, (1..=30).collect::<Vec<i64>>());

        let mut empty = Permutation::new(0).unwrap();
        assert_eq!(empty.render(&mut rng).unwrap(), "");
    }
}
