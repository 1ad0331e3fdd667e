//! Core XML parsing primitives
//!
//! This module contains the fundamental building blocks for the
//! fidelity-preserving XML round trip:
//! - Scanner: SIMD-accelerated delimiter detection using memchr
//! - Tokenizer: State machine emitting raw XML tokens (no entity decoding)
//! - Attributes: Ordered, verbatim attribute parsing with quote retention
//! - Entities: Escaping of inserted fill values

pub mod attributes;
pub mod entities;
pub mod scanner;
pub mod tokenizer;
