//! Data models for certinfo
//!
//! This module contains the rendered-value types shared between the
//! certificate info builder and the output layer.

pub mod info;

pub use info::{Info, InfoValue};
