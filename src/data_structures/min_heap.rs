use std::fmt::Debug;

// Children of `i` live at `2i + 1` and `2i + 2`.
#[inline(always)]
#[must_use]
fn up(i: usize) -> usize {
    debug_assert!(i != 0, "The root has no parent");
    (i - 1) / 2
}
#[inline(always)]
#[must_use]
fn down_left(i: usize) -> usize {
    2 * i + 1
}
#[inline(always)]
#[must_use]
fn down_right(i: usize) -> usize {
    2 * i + 2
}

/// A binary min-heap.
///
/// Unlike `std::collections::BinaryHeap` the smallest element comes out first,
/// so ranks can be written in their natural order.
///
/// Elements that compare equal come out in an unspecified order. Make the
/// ordering total (e.g. with a sequence number) when that matters.
#[derive(Debug, Clone)]
pub struct MinHeap<T>
where
    T: Debug + Ord,
{
    heap: Vec<T>,
}

impl<T> MinHeap<T>
where
    T: Debug + Ord,
{
    pub fn new() -> Self {
        Self { heap: vec![] }
    }
    pub fn with_capacity(s: usize) -> Self {
        Self {
            heap: Vec::with_capacity(s),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
    pub fn len(&self) -> usize {
        self.heap.len()
    }
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    pub fn peek(&self) -> Option<&T> {
        self.heap.first()
    }

    pub fn push(&mut self, t: T) {
        self.verify_heap();

        let index = self.heap.len();
        self.heap.push(t);
        self.sift_up(index);

        self.verify_heap();
    }

    pub fn pop(&mut self) -> Option<T> {
        self.verify_heap();

        if self.heap.len() <= 1 {
            return self.heap.pop();
        }

        // The last element fills the hole left at the root and sinks back down.
        let top = self.heap.swap_remove(0);
        self.sift_down(0);

        self.verify_heap();
        Some(top)
    }

    #[inline(always)]
    #[cfg(not(feature = "verify"))]
    pub(crate) fn verify_heap(&self) {
        // All good... (hopefully)
    }

    #[inline(always)]
    #[cfg(feature = "verify")]
    pub(crate) fn verify_heap(&self) {
        // Every node goes after its parent node, if any.
        for i in 1..self.heap.len() {
            let p = up(i);
            assert!(
                self.heap[p] <= self.heap[i],
                "Node[{p}]={:?} !<= child [{i}]={:?}. Out of heap of len={}",
                self.heap[p],
                self.heap[i],
                self.heap.len(),
            );
        }
    }

    /// Raises a node
    /// Returns it's new index
    #[inline(always)]
    fn sift_up(&mut self, mut index: usize) -> usize {
        debug_assert!(index < self.heap.len(), "Index out of bounds...");

        while index != 0 {
            let parent = up(index);
            if self.heap[parent] <= self.heap[index] {
                break;
            }
            self.heap.swap(parent, index);
            index = parent;
        }
        index
    }

    /// Lowers a node
    /// Returns it's new index
    #[inline(always)]
    fn sift_down(&mut self, mut index: usize) -> usize {
        let len = self.heap.len();

        loop {
            let left = down_left(index);
            if left >= len {
                break;
            }
            // Find the best child
            let right = down_right(index);
            let child = if right < len && self.heap[right] < self.heap[left] {
                right
            } else {
                left
            };

            if self.heap[index] <= self.heap[child] {
                break;
            }
            self.heap.swap(index, child);
            index = child;
        }
        index
    }
}

impl<T> Default for MinHeap<T>
where
    T: Debug + Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;

    #[test]
    fn index_math() {
        assert_eq!(down_left(0), 1);
        assert_eq!(down_right(0), 2);
        assert_eq!(down_left(3), 7);
        assert_eq!(down_right(6), 14);
        for i in 0..100 {
            assert_eq!(up(down_left(i)), i);
            assert_eq!(up(down_right(i)), i);
        }
        assert_eq!(up(25), 12);
    }

    #[test]
    fn empty() {
        let mut h = MinHeap::<u32>::new();
        assert!(h.is_empty());
        assert_eq!(h.pop(), None);
        assert_eq!(h.peek(), None);
    }

    #[test]
    fn pops_in_order() {
        let mut h = MinHeap::with_capacity(8);
        for v in [5u32, 3, 8, 1, 9, 2, 2, 7] {
            h.push(v);
        }
        assert_eq!(h.len(), 8);
        assert_eq!(h.peek(), Some(&1));

        let mut out = vec![];
        while let Some(v) = h.pop() {
            out.push(v);
        }
        assert_eq!(out, vec![1, 2, 2, 3, 5, 7, 8, 9]);
    }

    #[test]
    fn interleaved_random() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut h = MinHeap::new();
        let mut reference: Vec<u32> = vec![];

        for _ in 0..2_000 {
            if rng.random_bool(0.6) {
                let v = rng.random_range(0..100u32);
                h.push(v);
                reference.push(v);
            } else {
                reference.sort_unstable_by(|a, b| b.cmp(a));
                assert_eq!(h.pop(), reference.pop());
            }
            assert_eq!(h.len(), reference.len());
        }
    }
}
