//! Rule implementations for keyschema.
//!
//! This module contains pure functions that check the derived key set and
//! the application's key usages. Each function takes only the specific
//! inputs it needs and returns a specific issue type.
//!
//! ## Module Structure
//!
//! - `helpers`: Shared utility functions over key usages
//! - `duplicate_key`: Dotted keys produced by more than one namespace
//! - `parity`: Keys whose presence differs between locales
//! - `unknown_key`: Referenced keys absent from the schema
//! - `deprecated_key`: References to deprecated keys
//! - `unused_key`: Schema keys nothing references

pub mod deprecated_key;
pub mod duplicate_key;
pub mod helpers;
pub mod parity;
pub mod unknown_key;
pub mod unused_key;
