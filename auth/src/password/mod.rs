pub mod errors;
pub mod hasher;

pub use errors::PasswordError;
pub use hasher::HashScheme;
pub use hasher::PasswordHasher;
pub use hasher::MAX_PASSWORD_BYTES;
