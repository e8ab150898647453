//! [`ActorState`] implementation for [`Cart`].
//!
//! Each handler computes the next snapshot from the current one, persists it, and
//! returns it; `handle_action` swaps it in only after that succeeds. On rejection the
//! handler's error is turned into exactly one notification and the current snapshot
//! is left as it was.

use async_trait::async_trait;
use tracing::{debug, info};

use super::actions::CartAction;
use super::error::{CartError, Cause};
use super::CartContext;
use crate::framework::ActorState;
use crate::model::{Cart, CartItem, ProductId};
use crate::notify::Notification;

#[async_trait]
impl ActorState for Cart {
    type Action = CartAction;
    type ActionResult = Cart;
    type Context = CartContext;
    type Error = CartError;

    fn size(&self) -> usize {
        self.len()
    }

    async fn handle_action(
        &mut self,
        action: CartAction,
        ctx: &CartContext,
    ) -> Result<Cart, CartError> {
        let result = match action {
            CartAction::AddProduct(id) => add_product(self, id, ctx).await,
            CartAction::RemoveProduct(id) => remove_product(self, id, ctx),
            CartAction::UpdateAmount { id, amount } => update_amount(self, id, amount, ctx).await,
        };

        match result {
            Ok(next) => {
                *self = next.clone();
                Ok(next)
            }
            Err(e) => {
                ctx.notifier.notify(Notification::error(&e));
                Err(e)
            }
        }
    }
}

async fn add_product(cart: &Cart, id: ProductId, ctx: &CartContext) -> Result<Cart, CartError> {
    if let Some(existing) = cart.amount_of(id) {
        debug!(product_id = %id, existing, "Already in cart, incrementing");
        return update_amount(cart, id, i64::from(existing) + 1, ctx).await;
    }

    let product = ctx
        .catalog
        .product(id)
        .await
        .map_err(|e| CartError::AddFailed(Cause::Service(e)))?;

    let next = cart.with_item(CartItem::from_product(product, 1));
    ctx.store
        .save(&next)
        .map_err(|e| CartError::AddFailed(Cause::Storage(e)))?;
    info!(product_id = %id, size = next.len(), "Product added");
    Ok(next)
}

fn remove_product(cart: &Cart, id: ProductId, ctx: &CartContext) -> Result<Cart, CartError> {
    let next = cart.without(id);
    ctx.store.save(&next).map_err(CartError::RemoveFailed)?;
    info!(product_id = %id, removed = next.len() < cart.len(), "Product removed");
    Ok(next)
}

async fn update_amount(
    cart: &Cart,
    id: ProductId,
    amount: i64,
    ctx: &CartContext,
) -> Result<Cart, CartError> {
    if amount <= 0 {
        return Err(CartError::InvalidAmount(amount));
    }

    let stock = ctx
        .stock
        .stock(id)
        .await
        .map_err(CartError::StockUnavailable)?;

    // Anything that does not fit in u32 is above any stock level.
    let amount = match u32::try_from(amount) {
        Ok(amount) if amount <= stock.amount => amount,
        _ => {
            return Err(CartError::InsufficientStock {
                requested: amount,
                available: stock.amount,
            })
        }
    };

    if !cart.contains(id) {
        debug!(product_id = %id, "Not in cart, nothing to update");
        return Ok(cart.clone());
    }

    let next = cart.with_amount(id, amount);
    ctx.store.save(&next).map_err(CartError::UpdateFailed)?;
    info!(product_id = %id, amount, "Amount updated");
    Ok(next)
}
