//! PCG-based RNG for demo scene setup.

/// PCG32 default multiplier.
const PCG_MULT: u64 = 6364136223846793005;
/// PCG32 default increment base.
const PCG_INIT: u64 = 0x853c49e6748fea9b;

/// Small PCG32 generator. Deterministic for a given seed.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
    inc: u64,
}

impl Rng {
    /// Creates a generator for `seed`.
    pub fn new(seed: u64) -> Self {
        let mut rng = Self { state: 0, inc: (seed << 1) | 1 };
        rng.next_u32();
        rng.state = rng.state.wrapping_add(PCG_INIT.wrapping_add(seed));
        rng.next_u32();
        rng
    }

    /// Seeds from the system clock.
    pub fn from_time() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self::new(nanos)
    }

    /// Next 32-bit random value.
    pub fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = old.wrapping_mul(PCG_MULT).wrapping_add(self.inc | 1);
        let xorshifted = (((old >> 18) ^ old) >> 27) as u32;
        let rot = (old >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    /// Uniform float in `[0, 1)`.
    pub fn next_f32(&mut self) -> f32 {
        let bits = (self.next_u32() >> 9) | 0x3f80_0000;
        f32::from_bits(bits) - 1.0
    }

    /// Uniform float in `[min, max)`.
    pub fn rand(&mut self, min: f32, max: f32) -> f32 {
        self.next_f32() * (max - min) + min
    }

    /// Uniform integer in `[min, max]`, both bounds inclusive.
    ///
    /// Returns `min` when `max < min`.
    pub fn rand_int(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        let span = (max as i64 - min as i64 + 1) as u64;
        let offset = (self.next_u32() as u64 * span) >> 32;
        (min as i64 + offset as i64) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Rng::new(7);
        let mut b = Rng::new(7);
        for _ in 0..32 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn rand_stays_in_half_open_range() {
        let mut rng = Rng::new(1);
        for _ in 0..10_000 {
            let v = rng.rand(-3.0, 5.0);
            assert!((-3.0..5.0).contains(&v));
        }
    }

    #[test]
    fn rand_int_hits_both_bounds() {
        let mut rng = Rng::new(42);
        let (mut saw_min, mut saw_max) = (false, false);
        for _ in 0..10_000 {
            let v = rng.rand_int(-2, 2);
            assert!((-2..=2).contains(&v));
            saw_min |= v == -2;
            saw_max |= v == 2;
        }
        assert!(saw_min && saw_max);
    }

    #[test]
    fn rand_int_degenerate_range() {
        let mut rng = Rng::new(3);
        assert_eq!(rng.rand_int(5, 5), 5);
        assert_eq!(rng.rand_int(5, 1), 5);
    }
}
