//! `stockbeads-auth` — authentication boundary.
//!
//! JWT claims and token issuance plus password hashing. Deliberately
//! decoupled from HTTP and storage.

pub mod claims;
pub mod password;
pub mod tokens;

pub use claims::{Claims, TokenKind, TokenPair};
pub use password::{hash_password, verify_password};
pub use tokens::{AuthError, JwtKeys};
