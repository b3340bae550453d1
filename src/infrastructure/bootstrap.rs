//! One-shot admin credential mint for first boot.
//!
//! Grounded on spec.md §6's `DEFAULT_ADMIN_PASSWORD` environment variable: if
//! unset, a random password is generated and returned to the caller (never
//! logged) alongside its bcrypt hash, ready to persist through `UserRepo`.

use bcrypt::{hash, BcryptError};
use rand::RngCore;

const DEFAULT_ADMIN_PASSWORD_ENV: &str = "DEFAULT_ADMIN_PASSWORD";
/// 24 raw bytes base64-encode to exactly 32 characters (no padding, since 24
/// is a multiple of 3), matching spec.md's "32-char base64 random password."
const GENERATED_PASSWORD_BYTES: usize = 24;

/// The admin password this boot ended up with, and its bcrypt hash.
///
/// `generated` is `true` when no `DEFAULT_ADMIN_PASSWORD` was set and a
/// random one was minted; callers should surface `password` to the operator
/// exactly once (e.g. printed to stderr at startup) and never log it.
pub struct BootstrapSecret {
    pub password: String,
    pub password_hash: String,
    pub generated: bool,
}

/// Resolve the admin bootstrap password, generating one if the environment
/// variable is unset, and hash it at `bcrypt_cost`.
pub fn bootstrap_admin_secret(bcrypt_cost: u32) -> Result<BootstrapSecret, BcryptError> {
    let (password, generated) = match std::env::var(DEFAULT_ADMIN_PASSWORD_ENV) {
        Ok(value) if !value.is_empty() => (value, false),
        _ => (generate_password(), true),
    };

    let password_hash = hash(&password, bcrypt_cost)?;

    Ok(BootstrapSecret { password, password_hash, generated })
}

fn generate_password() -> String {
    let mut bytes = [0u8; GENERATED_PASSWORD_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    base64::Engine::encode(&base64::engine::general_purpose::STANDARD, bytes)
}
