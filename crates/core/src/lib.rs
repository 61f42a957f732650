#![deny(unsafe_code)]
//! Core color model for colormix.
//!
//! Provides the immutable [`Color`] value (RGBA, hex and HSL views kept in
//! agreement), its text parser, the pure RGB/HSL/hex conversion functions,
//! the [`ColorSpec`] record for loosely-typed input, and [`ColorError`].

pub mod color;
pub mod error;

pub use color::{Color, ColorSpec, DEFAULT_ALPHA};
pub use error::ColorError;
