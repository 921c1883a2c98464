//! GoMarketplace Core - Shared domain types.
//!
//! This crate provides the common types used across the GoMarketplace cart
//! components:
//! - `cart` - The cart state container (device storage, store, provider)
//! - `cli` - Command-line tool for inspecting and mutating the cart
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no async. This keeps it lightweight and allows it to be used
//! anywhere, and it means every cart invariant can be unit tested without
//! touching storage.
//!
//! # Modules
//!
//! - [`types`] - Product identifiers, products, cart lines, and the cart
//!   collection itself

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
