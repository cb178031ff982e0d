use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use sha2::{Digest, Sha256};

const FINGERPRINT_LEN: usize = 16;

/// Generate a deterministic fingerprint for a suggestion.
///
/// Affected ids are sorted before hashing so the fingerprint does not depend
/// on the order the analyzer happened to visit the items in.
pub fn suggestion_fingerprint(kind: &str, discriminator: &str, affected_ids: &[String]) -> String {
    let mut ids: Vec<&str> = affected_ids.iter().map(String::as_str).collect();
    ids.sort_unstable();

    let mut hasher = Sha256::new();
    hasher.update(kind.as_bytes());
    hasher.update([0u8]);
    hasher.update(discriminator.as_bytes());
    for id in ids {
        hasher.update([0u8]);
        hasher.update(id.as_bytes());
    }

    let digest = hasher.finalize();
    let mut encoded = URL_SAFE_NO_PAD.encode(digest);
    encoded.truncate(FINGERPRINT_LEN);
    encoded
}
