use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

pub type DigestOutput = u64;

pub trait Digestible {
    fn digest(&self) -> DigestOutput;
}

/// Hashes any `Hash` value into a `DigestOutput`. Digests are only stable
/// within a single process.
pub fn digest_of<T: Hash + ?Sized>(value: &T) -> DigestOutput {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}
