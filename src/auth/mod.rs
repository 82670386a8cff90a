//! Authentication primitives: password hashing and signed access tokens.

mod password;
mod token;

pub use password::{STRETCH_ROUNDS, hash_password, verify_password, verify_password_or_dummy};
pub use token::{TokenClaims, TokenSigner};
