//! Operations the cart actor performs.
//!
//! All of them answer with the cart snapshot in effect after the call.

use crate::model::ProductId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Adds one unit. A product already in the cart goes through `UpdateAmount`
    /// with its amount plus one; a new one is looked up in the catalog.
    AddProduct(ProductId),
    /// Drops the product's line. Absent ids are a no-op.
    RemoveProduct(ProductId),
    /// Sets the amount of a line after validating it against stock.
    ///
    /// Signed on purpose: callers pass raw user input, and zero or negative values
    /// are rejected rather than interpreted.
    UpdateAmount { id: ProductId, amount: i64 },
}
