//! Argon2id password digests.

mod argon2;
mod errors;

pub use self::argon2::HashingCost;
pub use self::argon2::PasswordHasher;
pub use errors::PasswordError;
