use super::physics::Facing;

/// Seeded xorshift32 so a given tuning seed replays the same patrols and starfield.
#[derive(Debug, Clone)]
pub(crate) struct SimRng {
    state: u32,
}

impl SimRng {
    /// A zero seed would lock xorshift at zero, so it is bumped to one.
    pub(crate) fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub(crate) fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform integer in `[min, max]`; returns `min` when the range is empty.
    pub(crate) fn range_inclusive(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        let span = (max as i64 - min as i64 + 1) as u64;
        let offset = (self.next_u32() as u64 * span) >> 32;
        (min as i64 + offset as i64) as i32
    }

    pub(crate) fn facing(&mut self) -> Facing {
        if self.next_u32() & 1 == 0 {
            Facing::Left
        } else {
            Facing::Right
        }
    }
}
