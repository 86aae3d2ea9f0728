//! Password hashing and JWT issuing/verification.

pub mod jwt;
pub mod password;
