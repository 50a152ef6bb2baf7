//! Oscilloscope ring buffer
//!
//! Single writer (the audio thread), any number of readers. Slots and the
//! cursor are independent atomics, so a reader racing the writer can see a
//! mix of old and new points. That tear is acceptable for a display.

use portable_atomic::{AtomicF32, AtomicUsize, Ordering};

/// Fixed-size ring of recent output samples
#[derive(Debug)]
pub struct ScopeBuffer {
    slots: Box<[AtomicF32]>,
    write_pos: AtomicUsize,
}

impl ScopeBuffer {
    /// Allocate `capacity` slots (at least one)
    pub fn new(capacity: usize) -> Self {
        let slots: Vec<AtomicF32> = (0..capacity.max(1)).map(|_| AtomicF32::new(0.0)).collect();
        Self {
            slots: slots.into_boxed_slice(),
            write_pos: AtomicUsize::new(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Store a point and advance the cursor
    #[inline]
    pub fn write(&self, sample: f32) {
        let pos = self.write_pos.load(Ordering::Relaxed) % self.slots.len();
        self.slots[pos].store(sample, Ordering::Relaxed);
        self.write_pos
            .store((pos + 1) % self.slots.len(), Ordering::Relaxed);
    }

    /// Copy points oldest first, starting at the cursor
    ///
    /// Copies `min(out.len(), capacity)` points and returns that count.
    pub fn snapshot(&self, out: &mut [f32]) -> usize {
        let len = self.slots.len();
        let count = out.len().min(len);
        let start = self.write_pos.load(Ordering::Relaxed) % len;
        for (i, dst) in out.iter_mut().take(count).enumerate() {
            *dst = self.slots[(start + i) % len].load(Ordering::Relaxed);
        }
        count
    }

    /// Zero every slot and rewind the cursor
    pub fn clear(&self) {
        for slot in self.slots.iter() {
            slot.store(0.0, Ordering::Relaxed);
        }
        self.write_pos.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_is_oldest_first() {
        let scope = ScopeBuffer::new(4);
        for v in 1..=6 {
            scope.write(v as f32);
        }
        let mut out = [0.0; 4];
        assert_eq!(scope.snapshot(&mut out), 4);
        assert_eq!(out, [3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_partial_and_oversized_reads() {
        let scope = ScopeBuffer::new(4);
        for v in 1..=3 {
            scope.write(v as f32);
        }

        let mut short = [0.0; 2];
        assert_eq!(scope.snapshot(&mut short), 2);
        // Cursor sits on the one unwritten slot
        assert_eq!(short, [0.0, 1.0]);

        let mut long = [-1.0; 6];
        assert_eq!(scope.snapshot(&mut long), 4);
        assert_eq!(long, [0.0, 1.0, 2.0, 3.0, -1.0, -1.0]);
    }

    #[test]
    fn test_clear() {
        let scope = ScopeBuffer::new(3);
        scope.write(0.5);
        scope.clear();
        let mut out = [1.0; 3];
        scope.snapshot(&mut out);
        assert_eq!(out, [0.0; 3]);
        assert_eq!(scope.capacity(), 3);
    }

    #[test]
    fn test_zero_capacity_rounds_up() {
        let scope = ScopeBuffer::new(0);
        assert_eq!(scope.capacity(), 1);
        scope.write(0.25);
        let mut out = [0.0; 1];
        scope.snapshot(&mut out);
        assert_eq!(out, [0.25]);
    }
}
