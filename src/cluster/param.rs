/// Smallest accepted K
pub const K_MIN: u8 = 1;
/// Largest accepted K
pub const K_MAX: u8 = u8::MAX;
/// K of a freshly created partitioner
pub const K_DEFAULT: u8 = 5;

/// Integer parameter constrained to `[MIN, MAX]`
///
/// Out-of-range assignments are ignored and the previous value stays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constrained<const MIN: u8, const MAX: u8, const DEFAULT: u8> {
    value: u8,
}

/// The K parameter shared by every partitioner
pub type KParam = Constrained<K_MIN, K_MAX, K_DEFAULT>;

impl<const MIN: u8, const MAX: u8, const DEFAULT: u8> Constrained<MIN, MAX, DEFAULT> {
    pub const fn new() -> Self {
        Self { value: DEFAULT }
    }

    pub const fn get(&self) -> u8 {
        self.value
    }

    pub fn is_in_range(value: u32) -> bool {
        (u32::from(MIN)..=u32::from(MAX)).contains(&value)
    }

    /// Stores `value` if it lies in `[MIN, MAX]`; returns whether it did
    pub fn set(&mut self, value: u32) -> bool {
        if !Self::is_in_range(value) {
            return false;
        }
        // Range check above guarantees the value fits
        self.value = value as u8;
        true
    }

    /// Steps up by one, stopping at `MAX`
    pub fn increment(&mut self) {
        if self.value < MAX {
            self.value += 1;
        }
    }

    /// Steps down by one, stopping at `MIN`
    pub fn decrement(&mut self) {
        if self.value > MIN {
            self.value -= 1;
        }
    }
}

impl<const MIN: u8, const MAX: u8, const DEFAULT: u8> Default for Constrained<MIN, MAX, DEFAULT> {
    fn default() -> Self {
        Self::new()
    }
}
