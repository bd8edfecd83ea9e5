//! Common utilities for xnbrepack.
//!
//! This crate provides the foundational types used across the xnbrepack
//! crates:
//!
//! - [`BinaryReader`] - Zero-copy binary reading from byte slices, including
//!   the .NET 7-bit varint and length-prefixed string conventions
//! - [`writer`] - The matching serialization helpers

mod error;
mod reader;

pub mod writer;

pub use error::{Error, Result};
pub use reader::BinaryReader;
