//! keyschema - translation key schema generator and validator
//!
//! keyschema reads namespaced locale files, flattens them into dotted keys,
//! merges them in a declared namespace order, detects duplicate keys and
//! locale parity gaps, tracks deprecated keys, and emits one deterministic
//! TypeScript declaration of every valid key together with a SHA-256 sidecar.
//! A companion validation pass checks application source against the schema.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, commands, report output)
//! - `config`: Configuration file loading and parsing
//! - `core`: Generator pipeline (loader, flattener, merger, tracker, emitter)
//! - `issues`: Finding type definitions and reporting
//! - `rules`: Duplicate, parity and key usage rules
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod rules;
pub mod utils;
