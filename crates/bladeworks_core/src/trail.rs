//! # Trail Ring Buffer
//!
//! Fixed-capacity history of blade tip positions and rotations.
//!
//! ## Layout
//!
//! Two parallel arrays, written in lock-step, so the per-frame trail draw
//! walks two flat slices instead of chasing pointers:
//!
//! ```text
//! positions: [p3][p4][p0][p1][p2]      write_index = 2 (next slot)
//! rotations: [r3][r4][r0][r1][r2]
//!                     ▲
//!        read order: p4, p3, p2, p1, p0   (most recent first)
//! ```
//!
//! One sample is written per simulation tick, whether or not a frame is
//! rendered that tick.

use bladeworks_shared::Vec2;

/// One recorded blade state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrailSample {
    /// Blade tip position.
    pub position: Vec2,
    /// Blade rotation (radians).
    pub rotation: f32,
}

impl TrailSample {
    /// Creates a new sample.
    #[must_use]
    pub const fn new(position: Vec2, rotation: f32) -> Self {
        Self { position, rotation }
    }
}

/// Circular buffer of the most recent [`TrailSample`]s.
///
/// All memory is allocated in [`TrailRingBuffer::new`]. Pushing and reading
/// never allocate.
#[derive(Debug, Clone)]
pub struct TrailRingBuffer {
    /// Tip positions.
    positions: Box<[Vec2]>,
    /// Rotations, same indexing as `positions`.
    rotations: Box<[f32]>,
    /// Slot the next push writes to.
    write_index: usize,
    /// Number of valid samples (saturates at capacity).
    len: usize,
}

impl TrailRingBuffer {
    /// Creates a buffer holding up to `capacity` samples (at least 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            positions: vec![Vec2::ZERO; capacity].into_boxed_slice(),
            rotations: vec![0.0; capacity].into_boxed_slice(),
            write_index: 0,
            len: 0,
        }
    }

    /// Maximum number of samples kept.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.positions.len()
    }

    /// Number of samples currently readable.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True if nothing has been pushed since construction or the last clear.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Records a sample, overwriting the oldest once full.
    ///
    /// This is a **O(1)** operation with **zero heap allocations**.
    #[inline]
    pub fn push(&mut self, sample: TrailSample) {
        let capacity = self.capacity();
        self.positions[self.write_index] = sample.position;
        self.rotations[self.write_index] = sample.rotation;
        self.write_index = (self.write_index + 1) % capacity;
        self.len = (self.len + 1).min(capacity);
    }

    /// The `age`-th most recent sample (0 = latest).
    #[inline]
    #[must_use]
    pub fn get(&self, age: usize) -> Option<TrailSample> {
        if age >= self.len {
            return None;
        }
        let capacity = self.capacity();
        let index = (self.write_index + capacity - 1 - age) % capacity;
        Some(TrailSample::new(self.positions[index], self.rotations[index]))
    }

    /// The latest sample.
    #[inline]
    #[must_use]
    pub fn latest(&self) -> Option<TrailSample> {
        self.get(0)
    }

    /// Iterates samples most recent first.
    #[must_use]
    pub fn read_ordered(&self) -> TrailIter<'_> {
        TrailIter {
            buffer: self,
            front: 0,
            back: self.len,
        }
    }

    /// Forgets every sample without releasing memory.
    pub fn clear(&mut self) {
        self.write_index = 0;
        self.len = 0;
    }
}

/// Most-recent-first iterator over a [`TrailRingBuffer`].
#[derive(Debug, Clone)]
pub struct TrailIter<'a> {
    buffer: &'a TrailRingBuffer,
    front: usize,
    back: usize,
}

impl Iterator for TrailIter<'_> {
    type Item = TrailSample;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let sample = self.buffer.get(self.front);
        self.front += 1;
        sample
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for TrailIter<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.buffer.get(self.back)
    }
}

impl ExactSizeIterator for TrailIter<'_> {}
