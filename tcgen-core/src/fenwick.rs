//! Order-statistics tree over the ranks `1..=n`.
//!
//! A Fenwick tree of 0/1 counts: every rank starts alive, [`Fenwick::find_kth`]
//! locates the `k`-th surviving rank by descending the implicit tree, and
//! [`Fenwick::remove`] kills a rank. Both are `O(log n)`.

#[derive(Debug, Clone)]
pub struct Fenwick {
    tree: Vec<u32>,
    remaining: usize,
}

impl Fenwick {
    /// A tree with every rank in `1..=n` alive.
    pub fn new(n: usize) -> Self {
        // Node `i` covers `lowbit(i)` ranks, all of them alive.
        let tree = (0..=n).map(|i| (i & i.wrapping_neg()) as u32).collect();
        Fenwick { tree, remaining: n }
    }

    pub fn len(&self) -> usize {
        self.tree.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of ranks still alive.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Number of alive ranks in `1..=rank`.
    pub fn prefix(&self, rank: usize) -> usize {
        let mut i = rank.min(self.len());
        let mut sum = 0;
        while i > 0 {
            sum += self.tree[i] as usize;
            i &= i - 1;
        }
        sum
    }

    /// Smallest rank whose prefix count reaches `k`, if `1 <= k <= remaining`.
    pub fn find_kth(&self, k: usize) -> Option<usize> {
        if k == 0 || k > self.remaining {
            return None;
        }
        let mut pos = 0;
        let mut left = k;
        let mut step = self.len().checked_next_power_of_two()?;
        while step > 0 {
            let next = pos + step;
            if next <= self.len() && (self.tree[next] as usize) < left {
                pos = next;
                left -= self.tree[next] as usize;
            }
            step >>= 1;
        }
        Some(pos + 1)
    }

    /// Kill `rank`. Returns `false` if it was out of range or already dead.
    pub fn remove(&mut self, rank: usize) -> bool {
        if rank == 0 || rank > self.len() || self.prefix(rank) == self.prefix(rank - 1) {
            return false;
        }
        let mut i = rank;
        while i <= self.len() {
            self.tree[i] -= 1;
            i += i & i.wrapping_neg();
        }
        self.remaining -= 1;
        true
    }
}
