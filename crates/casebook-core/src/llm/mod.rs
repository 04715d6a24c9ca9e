//! Text-completion provider abstraction.
//!
//! The trait here is the seam between the conversation core and the
//! external completion API; the concrete HTTP client lives in
//! casebook-infra.

pub mod provider;
