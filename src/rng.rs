use sha2::Digest;

/// Deterministic xorshift128+ stream seeded from the SHA-256 of a seed string.
///
/// The entire future of the stream is a function of the seed alone: two
/// instances built from the same seed produce bit-identical `next_u32`
/// sequences, which is the contract replay verification is specified
/// against. Forks derive an independent stream from `seed ++ ":" ++ label`
/// without consuming state from the parent.
#[derive(Debug, Clone)]
pub struct Rng {
    seed: String,
    s0: u64,
    s1: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RngError {
    #[error("cannot pick from an empty sequence")]
    EmptySequence,
}

impl Rng {
    pub fn new(seed: &str) -> Self {
        let digest = sha2::Sha256::digest(seed.as_bytes());
        let s0 = u64::from_be_bytes(digest[0..8].try_into().expect("8 bytes"));
        let s1 = u64::from_be_bytes(digest[8..16].try_into().expect("8 bytes"));
        Self {
            seed: seed.to_string(),
            s0: if s0 == 0 { 1 } else { s0 },
            s1: if s1 == 0 { 1 } else { s1 },
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// One raw 32-bit draw: self-mix `s1`, fold in the untouched `s0`,
    /// rotate the old `s1` into `s0`, and sum the pre-rotation `s0` with
    /// the fresh `s1` mod 2^32.
    pub fn next_u32(&mut self) -> u32 {
        let s0 = self.s0;
        let mut s1 = self.s1;
        self.s0 = s1;
        s1 ^= s1 << 23;
        s1 ^= s1 >> 18;
        s1 ^= s0;
        s1 ^= s0 >> 5;
        self.s1 = s1;
        s0.wrapping_add(s1) as u32
    }

    /// uniform in [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / 4294967296.0
    }

    /// uniform element of a non-empty sequence
    pub fn pick<'a, T>(&mut self, xs: &'a [T]) -> Result<&'a T, RngError> {
        if xs.is_empty() {
            return Err(RngError::EmptySequence);
        }
        let i = (self.next_f64() * xs.len() as f64) as usize;
        Ok(&xs[i])
    }

    /// Fisher-Yates permutation of the input; the original is untouched
    pub fn shuffle<T: Clone>(&mut self, xs: &[T]) -> Vec<T> {
        let mut out = xs.to_vec();
        for i in (1..out.len()).rev() {
            let j = (self.next_f64() * (i + 1) as f64) as usize;
            out.swap(i, j);
        }
        out
    }

    /// derived stream seeded by `seed ++ ":" ++ label`, independent of
    /// any further draws from this one
    pub fn fork(&self, label: &str) -> Rng {
        Rng::new(&format!("{}:{}", self.seed, label))
    }
}
