//! Response memory for Casebook.
//!
//! This module holds the `ResponseMemoryStore`: a bounded, persisted log of
//! prior assistant responses used to surface related past answers.

pub mod store;
