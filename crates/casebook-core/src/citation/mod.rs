//! Citation catalog for Casebook.
//!
//! A searchable collection of legal citations. Keyword search uses
//! case-insensitive substring containment, deliberately simpler than the
//! topic-overlap scoring used by the memory stores; the two matching
//! strategies coexist and must not be unified.

mod data;

pub mod catalog;
