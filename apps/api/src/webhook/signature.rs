//! Webhook signature verification.
//!
//! Ashby signs the raw request body with HMAC-SHA256 and sends the hex digest
//! in the `X-Ashby-Signature` header. Verification is only enforced when a
//! shared secret is configured.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the hex-encoded HMAC digest of the raw body.
pub const SIGNATURE_HEADER: &str = "X-Ashby-Signature";

/// Checks a presented signature against the expected digest of the payload.
pub fn verify(secret: &str, payload: &[u8], signature: &str) -> bool {
    constant_time_compare(signature, &compute(secret, payload))
}

/// Computes the hex HMAC-SHA256 digest of the payload under the secret.
/// Also what a sender (or a test) uses to produce a valid signature.
pub fn compute(secret: &str, payload: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take any size key");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
