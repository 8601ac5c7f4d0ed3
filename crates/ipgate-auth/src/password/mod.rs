//! Password verification backed by Argon2id hashes in the user store.

pub mod hasher;

pub use hasher::PasswordHasher;
