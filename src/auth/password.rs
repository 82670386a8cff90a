//! Password hashing.
//!
//! Hashes are `hex(salt)$hex(hash)`, where the hash is the SHA-256 digest
//! of the password fed through [`STRETCH_ROUNDS`] rounds of HMAC-SHA256
//! keyed by a random 16-byte salt.

use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::error::{TaxError, AppResult};

type HmacSha256 = Hmac<Sha256>;

const SALT_LEN: usize = 16;

/// Number of HMAC rounds applied to the password digest.
pub const STRETCH_ROUNDS: u32 = 4096;

/// A well-formed hash no password is expected to match. Verified against
/// when the account is unknown, so a miss costs as much as a wrong password.
const DUMMY_PASSWORD_HASH: &str = "00000000000000000000000000000000$\
     0000000000000000000000000000000000000000000000000000000000000000";

/// Hashes a password with a fresh random salt.
///
/// # Examples
///
/// ```
/// use tax_calculator::auth::{hash_password, verify_password};
///
/// let stored = hash_password("hunter22").unwrap();
/// assert!(verify_password("hunter22", &stored));
/// assert!(!verify_password("hunter23", &stored));
/// ```
pub fn hash_password(password: &str) -> AppResult<String> {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);

    let hash = stretch(&salt, password)?.finalize().into_bytes();
    Ok(format!("{}${}", hex::encode(salt), hex::encode(hash)))
}

/// Checks `password` against a stored hash in constant time.
///
/// Malformed stored hashes never verify.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt_hex, hash_hex)) = stored.split_once('$') else {
        return false;
    };
    let (Ok(salt), Ok(expected)) = (hex::decode(salt_hex), hex::decode(hash_hex)) else {
        return false;
    };
    if salt.len() != SALT_LEN {
        return false;
    }

    match stretch(&salt, password) {
        Ok(mac) => mac.verify_slice(&expected).is_ok(),
        Err(_) => false,
    }
}

/// Checks `password` against `stored`, or against a dummy hash when there
/// is no stored hash. Always false in the latter case.
///
/// # Examples
///
/// ```
/// use tax_calculator::auth::{hash_password, verify_password_or_dummy};
///
/// let stored = hash_password("hunter22").unwrap();
/// assert!(verify_password_or_dummy("hunter22", Some(&stored)));
/// assert!(!verify_password_or_dummy("hunter22", None));
/// ```
pub fn verify_password_or_dummy(password: &str, stored: Option<&str>) -> bool {
    match stored {
        Some(stored) => verify_password(password, stored),
        None => {
            let _ = verify_password(password, DUMMY_PASSWORD_HASH);
            false
        }
    }
}

/// Runs every round but the last finalisation, so callers can either
/// finalise or verify.
fn stretch(salt: &[u8], password: &str) -> AppResult<HmacSha256> {
    let mut block = Sha256::digest(password.as_bytes());
    for _ in 1..STRETCH_ROUNDS {
        let mut mac = keyed(salt)?;
        mac.update(&block);
        block = mac.finalize().into_bytes();
    }
    let mut mac = keyed(salt)?;
    mac.update(&block);
    Ok(mac)
}

fn keyed(salt: &[u8]) -> AppResult<HmacSha256> {
    HmacSha256::new_from_slice(salt).map_err(|e| TaxError::Internal {
        message: format!("failed to key password hash: {e}"),
    })
}
