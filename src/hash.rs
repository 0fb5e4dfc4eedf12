use strum_macros::{Display, EnumString, VariantNames};

/// Maps a key to a 64-bit hash. The table reduces it modulo the bucket count, so the same key must
/// always hash to the same value.
pub trait KeyHasher {
    fn hash(&self, key: i64) -> u64;
}

impl<F> KeyHasher for F
where
    F: Fn(i64) -> u64,
{
    fn hash(&self, key: i64) -> u64 {
        self(key)
    }
}

/// The hash functions selectable from the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString, VariantNames)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum HasherKind {
    /// Well distributed, see [`mix64`].
    #[default]
    Mix,
    /// The key's two's complement bits. Keys `k` and `k + N` share a bucket unless the pair
    /// straddles zero and `N` is not a power of two.
    Identity,
    /// Every key lands in bucket zero, turning the table into a single linked list.
    Constant,
}

impl KeyHasher for HasherKind {
    fn hash(&self, key: i64) -> u64 {
        match self {
            HasherKind::Mix => mix64(key as u64),
            HasherKind::Identity => key as u64,
            HasherKind::Constant => 0,
        }
    }
}

/// Finalizer of the SplitMix64 generator. A bijection on `u64`, so distinct keys never produce the
/// same hash, and neighbouring keys are spread across the whole range.
pub fn mix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}
