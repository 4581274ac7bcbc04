//! Conversion between the compact interval format and the dense minute grid.
//!
//! - [`encode`]: compact day/week specifications to minute cells
//! - [`decode`]: minute cells back to the canonical compact form

pub mod decode;
pub mod encode;


pub use decode::{decode_day, decode_schedule};
pub use encode::{encode_day, encode_schedule};
