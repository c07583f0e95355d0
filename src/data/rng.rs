// ---------------------------------------------------------------------------
// Deterministic PRNG for simulated ratings
// ---------------------------------------------------------------------------

/// Seed used for every simulated-rating stream.
pub const RATING_SEED: u32 = 42;

/// Bounds of the simulated rating distribution.
pub const RATING_LOW: f64 = 3.5;
pub const RATING_HIGH: f64 = 9.5;

const N: usize = 624;
const M: usize = 397;
const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;

/// Mersenne Twister (MT19937), seeded like NumPy's legacy `RandomState(seed)`
/// so a given seed yields the same stream of doubles.
pub struct Mt19937 {
    state: [u32; N],
    index: usize,
}

impl Mt19937 {
    pub fn new(seed: u32) -> Self {
        let mut state = [0u32; N];
        state[0] = seed;
        for i in 1..N {
            let prev = state[i - 1];
            state[i] = 1_812_433_253u32
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(i as u32);
        }
        Mt19937 { state, index: N }
    }

    fn twist(&mut self) {
        for i in 0..N {
            let y = (self.state[i] & UPPER_MASK) | (self.state[(i + 1) % N] & LOWER_MASK);
            let mut next = self.state[(i + M) % N] ^ (y >> 1);
            if y & 1 != 0 {
                next ^= MATRIX_A;
            }
            self.state[i] = next;
        }
        self.index = 0;
    }

    pub fn next_u32(&mut self) -> u32 {
        if self.index >= N {
            self.twist();
        }
        let mut y = self.state[self.index];
        self.index += 1;

        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^= y >> 18;
        y
    }

    /// Uniform double in [0, 1) with 53 bits of precision.
    pub fn next_f64(&mut self) -> f64 {
        let a = u64::from(self.next_u32() >> 5);
        let b = u64::from(self.next_u32() >> 6);
        (a * 67_108_864 + b) as f64 / 9_007_199_254_740_992.0
    }

    /// Uniform double in [low, high).
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }
}

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Draws simulated ratings from the seeded stream, one per call.
pub struct RatingSampler {
    rng: Mt19937,
}

impl RatingSampler {
    pub fn new(seed: u32) -> Self {
        RatingSampler {
            rng: Mt19937::new(seed),
        }
    }

    pub fn next_rating(&mut self) -> f64 {
        round1(self.rng.uniform(RATING_LOW, RATING_HIGH))
    }
}

impl Default for RatingSampler {
    fn default() -> Self {
        Self::new(RATING_SEED)
    }
}
