//! Hashing and Merkle authentication.

pub mod digest;
pub mod merkle;
