//! 32-bit FNV-1a over UTF-16 code units.
//!
//! Paths are hashed one UTF-16 code unit at a time rather than byte by byte,
//! so a fingerprint of a non-ASCII member name is identical to the one a
//! UTF-16 host string would produce. For ASCII text the two agree with the
//! classic byte-oriented FNV-1a.
//!
//! FNV-1a is incremental: hashing `"#/a"` in one call or hashing `"#"` and
//! then continuing with `"/a"` through [`Fnv1a::update`] yields the same
//! fingerprint. The walker relies on this to fingerprint canonical paths
//! without materializing them.

/// FNV-1a 32-bit offset basis.
pub const OFFSET_BASIS: u32 = 0x811c_9dc5;

/// FNV-1a 32-bit prime.
pub const PRIME: u32 = 16_777_619;

/// A seeded FNV-1a hasher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fnv1a {
    seed: u32,
}

impl Fnv1a {
    /// Hasher seeded with the standard offset basis.
    pub const fn new() -> Self {
        Self { seed: OFFSET_BASIS }
    }

    /// Hasher seeded with a custom basis.
    pub const fn with_seed(seed: u32) -> Self {
        Self { seed }
    }

    /// The seed this hasher starts from.
    pub const fn seed(&self) -> u32 {
        self.seed
    }

    /// Fingerprint a whole string.
    pub fn hash(&self, text: &str) -> u32 {
        Self::update(self.seed, text)
    }

    /// Continue a running fingerprint with more text.
    pub fn update(state: u32, text: &str) -> u32 {
        text.encode_utf16().fold(state, step)
    }

    /// Fingerprint a sequence of UTF-16 code units.
    pub fn hash_utf16(&self, units: &[u16]) -> u32 {
        units.iter().copied().fold(self.seed, step)
    }
}

impl Default for Fnv1a {
    fn default() -> Self {
        Self::new()
    }
}

/// One FNV-1a round. The shift sum is the prime 16777619 = 1+2+16+128+256+2^24.
#[inline]
fn step(h: u32, unit: u16) -> u32 {
    let h = h ^ u32::from(unit);
    h.wrapping_add(h << 1)
        .wrapping_add(h << 4)
        .wrapping_add(h << 7)
        .wrapping_add(h << 8)
        .wrapping_add(h << 24)
}
