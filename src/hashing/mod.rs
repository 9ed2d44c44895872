//! BLAKE3-based keys.

/// 32-byte key for an exact raw query string.
///
/// Two queries share a key only if they are byte-identical (collisions are
/// computationally infeasible at 256 bits), so this is a drop-in for keying by the
/// string itself without storing long case descriptions as map keys.
#[inline]
pub fn hash_query(query: &str) -> [u8; 32] {
    *blake3::hash(query.as_bytes()).as_bytes()
}

/// 64-bit BLAKE3 prefix, used as a seed for deterministic stub data.
#[inline]
pub fn hash_to_u64(data: &[u8]) -> u64 {
    let hash = blake3::hash(data);
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}
