//! Unique identifier generation for artifact names.
//!
//! The generator is injected into the store so tests can pin names while
//! production gets collision-free random ids.

use std::sync::atomic::{AtomicU64, Ordering};

/// Source of unique artifact identifiers.
pub trait IdGenerator: Send + Sync {
    /// Produce a fresh identifier, safe for use in a filename.
    fn generate(&self) -> String;
}

/// Random 12-hex-char identifiers (48 bits of entropy).
#[derive(Debug, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn generate(&self) -> String {
        let bytes: [u8; 6] = rand::random();
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}

/// Deterministic sequential identifiers for tests.
#[derive(Debug, Default)]
pub struct SequentialIds {
    counter: AtomicU64,
}

impl IdGenerator for SequentialIds {
    fn generate(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{n:012x}")
    }
}
