//! # Password Hashing & Login Rules
//!
//! Argon2 password hashing (PHC string format) and the pure part of the
//! login decision. The database lookup lives in kirana-db; given the stored
//! employee row this module decides accept/reject.
//!
//! ## Login Decision
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  authorize_login(employee, password, selected_role)                     │
//! │                                                                         │
//! │  1. is_active?          no  → AccountDeactivated                        │
//! │  2. password matches?   no  → InvalidCredentials                        │
//! │  3. role == selected?   no  → RoleMismatch                              │
//! │  4. → Ok                                                                │
//! │                                                                         │
//! │  Correct admin credentials with "employee" selected fail at step 3.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::AuthError;
use crate::types::{Employee, Role};

// =============================================================================
// Hashing
// =============================================================================

/// Hashes a password into an argon2 PHC string for storage.
///
/// A fresh random salt is generated per call, so the same password hashes
/// differently every time.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verifies a password against a stored PHC string.
///
/// Returns `Ok(false)` for a wrong password; `Err` only when the stored
/// hash itself is malformed.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| AuthError::Hash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

// =============================================================================
// Login Decision
// =============================================================================

/// Decides whether a login attempt against a stored employee row succeeds.
///
/// Check order matters: deactivation is reported before a password check
/// runs, and the role mismatch is only reported once the password is known
/// to be correct.
pub fn authorize_login(
    employee: &Employee,
    password: &str,
    selected_role: Role,
) -> Result<(), AuthError> {
    if !employee.is_active {
        return Err(AuthError::AccountDeactivated);
    }

    if !verify_password(password, &employee.password_hash)? {
        return Err(AuthError::InvalidCredentials);
    }

    if employee.role != selected_role {
        return Err(AuthError::RoleMismatch);
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
