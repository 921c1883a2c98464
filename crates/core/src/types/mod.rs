//! Core types for the GoMarketplace cart.
//!
//! This module provides the domain vocabulary shared by every component.

pub mod cart;
pub mod id;
pub mod product;

pub use cart::{Cart, CartLine, UnknownProduct};
pub use id::ProductId;
pub use product::Product;
