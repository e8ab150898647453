//! Domain models.
//!
//! Plain data: products and stock as the remote services describe them, and the
//! [`Cart`] snapshot the cart actor owns.

pub mod cart;
pub mod product;

pub use cart::*;
pub use product::*;
