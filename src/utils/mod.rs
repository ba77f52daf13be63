//! Utility functions for overlap scoring, token generation, and text hashing.
//!
//! This module provides helper functions used across the pipeline:
//!
//! - [`ngram`] - N-gram extraction and overlap scoring
//! - [`token_generator`] - Secure share-token generation
//! - [`source_domain`] - Source-domain extraction from origin URLs
//! - [`source_hash`] - SHA-256 audit hashing of original instructions
//! - [`clock`] - Injectable time source

pub mod clock;
pub mod ngram;
pub mod source_domain;
pub mod source_hash;
pub mod token_generator;
