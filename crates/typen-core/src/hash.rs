use xxhash_rust::xxh64::xxh64;

const BASE62_CHARS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const FINGERPRINT_LEN: usize = 11;

/// Encode a u64 value as a base62 string (11 chars, zero-padded).
fn base62_encode(mut value: u64) -> String {
    let mut result = Vec::with_capacity(FINGERPRINT_LEN);
    while value > 0 {
        let idx = (value % 62) as usize;
        result.push(BASE62_CHARS[idx] as char);
        value /= 62;
    }
    while result.len() < FINGERPRINT_LEN {
        result.push('0');
    }
    result.iter().rev().collect()
}

/// Fingerprint of a callable's contract.
///
/// fingerprint = base62(xxhash64(canonical_signature + '\0' + callable_kind))
///
/// The canonical signature is the rendered declaration (name, parameters with
/// kinds, specifiers and defaults, return specifier), so two wrappers share a
/// fingerprint exactly when they enforce the same contract.
pub fn signature_fingerprint(canonical_signature: &str, callable_kind: &str) -> String {
    let mut input = String::with_capacity(canonical_signature.len() + callable_kind.len() + 1);
    input.push_str(canonical_signature);
    input.push('\0');
    input.push_str(callable_kind);
    base62_encode(xxh64(input.as_bytes(), 0))
}
