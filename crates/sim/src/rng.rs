/// Deterministic random number generator over a splitmix64 step.
///
/// Every random draw in the simulation (enemy lateral spawn, snow respawn)
/// flows through one of these, so an entire run is reproducible from a
/// single `u64` seed. The raw state is part of the state hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRng {
    state: u64,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Raw generator state, for hashing and inspection.
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Next raw 64-bit value; advances the state.
    pub fn next_u64(&mut self) -> u64 {
        self.state = splitmix64(self.state);
        self.state
    }

    /// Uniform f32 in [0, 1), built from the top 24 bits.
    pub fn next_f32(&mut self) -> f32 {
        ((self.next_u64() >> 40) as f32) / (1u32 << 24) as f32
    }

    /// Uniform f32 in [min, max).
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }
}

/// Splitmix64 mixing function. Fast, well distributed, and stable across
/// platforms because it never touches floating point.
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
