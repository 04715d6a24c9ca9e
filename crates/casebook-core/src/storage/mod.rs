//! Persistence abstractions for Casebook.
//!
//! This module defines the `KeyValueStore` trait that the infrastructure
//! layer implements; the memory stores are generic over it.

pub mod kv_store;
