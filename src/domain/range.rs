/// Contiguous inclusive set of wheel values, e.g. `0..=23` for hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueRange {
    lo: u32,
    hi: u32,
}

impl ValueRange {
    pub const HOURS: ValueRange = ValueRange { lo: 0, hi: 23 };
    pub const MINUTES: ValueRange = ValueRange { lo: 0, hi: 59 };

    /// Builds a range, swapping the bounds when they arrive reversed so that
    /// `lo <= hi` always holds.
    pub fn new(lo: u32, hi: u32) -> Self {
        if lo <= hi {
            Self { lo, hi }
        } else {
            Self { lo: hi, hi: lo }
        }
    }

    pub fn lo(&self) -> u32 {
        self.lo
    }

    pub fn hi(&self) -> u32 {
        self.hi
    }

    /// Number of distinct values; never zero.
    pub fn len(&self) -> usize {
        (self.hi - self.lo) as usize + 1
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.lo..=self.hi).contains(&value)
    }

    pub fn clamp(&self, value: u32) -> u32 {
        value.clamp(self.lo, self.hi)
    }

    /// Position of `value` inside the range after clamping.
    pub fn index_of(&self, value: u32) -> usize {
        (self.clamp(value) - self.lo) as usize
    }

    /// Value stored at a real (already wrapped) index.
    pub fn value_at(&self, index: usize) -> u32 {
        self.lo + (index % self.len()) as u32
    }
}
