//! Recovery token generation

use rand::Rng;

/// Random bytes per recovery token; hex-encoding doubles the length.
const RESET_TOKEN_BYTES: usize = 6;

/// Generate a fresh single-use recovery token (hex-encoded random bytes).
pub fn generate_reset_token() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; RESET_TOKEN_BYTES] = rng.gen();
    hex::encode(bytes)
}
