//! Display masking and fingerprinting for sensitive credential values.

use sha2::{Digest, Sha256};

/// Values shorter than this are fully masked.
const FULL_MASK_THRESHOLD: usize = 12;

/// Values at or above this length show 4-character bookends instead of 2.
const PARTIAL_MASK_THRESHOLD: usize = 24;

/// Mask for short values (fully hidden).
const MASK_DOTS_8: &str = "••••••••";

/// Mask for medium/long values (with visible bookends).
const MASK_DOTS_12: &str = "••••••••••••";

/// Prefix prepended to the hex-encoded SHA-256 digest.
const HASH_PREFIX: &str = "sha256:";

/// Masks a sensitive value for display (e.g. `wJal••••••••••••EKEY`).
///
/// Blank values stay blank so an unset secret is distinguishable from a set one.
#[must_use]
pub fn mask(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let chars: Vec<char> = raw.chars().collect();
    let char_count = chars.len();

    if char_count < FULL_MASK_THRESHOLD {
        MASK_DOTS_8.to_string()
    } else if char_count < PARTIAL_MASK_THRESHOLD {
        let prefix: String = chars[..2].iter().collect();
        let suffix: String = chars[char_count - 2..].iter().collect();
        format!("{prefix}{MASK_DOTS_8}{suffix}")
    } else {
        let prefix: String = chars[..4].iter().collect();
        let suffix: String = chars[char_count - 4..].iter().collect();
        format!("{prefix}{MASK_DOTS_12}{suffix}")
    }
}

/// Returns a `sha256:<hex>` digest over the given parts.
///
/// Parts are separated by a NUL byte so `["ab", "c"]` and `["a", "bc"]` differ.
#[must_use]
pub fn fingerprint<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_bytes());
        hasher.update([0u8]);
    }
    format!("{HASH_PREFIX}{}", hex::encode(hasher.finalize()))
}
