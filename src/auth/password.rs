use rand::{distributions::Alphanumeric, Rng};
use sha2::{Digest, Sha256};

/// Deterministic one-way hash of a string. The service concatenates the
/// plaintext password with the stored per-user salt before hashing, and login
/// compares the recomputed digest byte-for-byte against the stored one.
pub trait Hasher: Send + Sync {
    fn hash(&self, data: &str) -> String;
}

/// SHA-256 digest, hex-encoded.
pub struct Sha256Hasher;

impl Hasher for Sha256Hasher {
    fn hash(&self, data: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data.as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// Random alphanumeric salt of the given length.
pub fn gen_salt(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
