//! Encryption orchestration.
//!
//! This module provides:
//! - Per-document and per-folder operation locks (`lock`)
//! - The encrypt/decrypt state machines and folder runs (`orchestrator`)
//! - Outcome and report types returned to callers (`outcome`)

pub mod lock;
pub mod orchestrator;
pub mod outcome;

pub use lock::{LockGuard, LockKey, OperationLocks};
pub use orchestrator::EncryptionOrchestrator;
pub use outcome::{DocumentOutcome, Failure, Mode, SkipReason, TreeOutcome, TreeReport};
