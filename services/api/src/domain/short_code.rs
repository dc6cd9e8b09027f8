use rand::RngExt;

use crate::domain::types::{MAX_SHORT_CODE_LEN, MIN_SHORT_CODE_LEN};

/// Charset for short codes (ASCII letters and digits).
const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Random alphanumeric code with length uniform in
/// `MIN_SHORT_CODE_LEN..=MAX_SHORT_CODE_LEN`. Not unique by itself.
pub fn generate_short_code() -> String {
    let mut rng = rand::rng();
    let len = rng.random_range(MIN_SHORT_CODE_LEN..=MAX_SHORT_CODE_LEN);
    (0..len)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}
