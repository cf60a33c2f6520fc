//! Vocabulary namespace modules.
//!
//! Each sub-module encodes the terms one namespace contributes as Rust static
//! data, together with `const` IRIs the mappers use directly. See
//! [`crate::Vocabulary::full`] for the assembly order.

pub mod pplan;
pub mod prov;
pub mod repr;
