//! # Observability & Tracing
//!
//! Compact, structured logs filtered by `RUST_LOG`.
//!
//! ```bash
//! RUST_LOG=info cart add 1      # outcomes only
//! RUST_LOG=debug cart add 1     # every request, payloads, HTTP calls
//! ```
//!
//! With `RUST_LOG=info` a rejected quantity change looks like:
//!
//! ```text
//! INFO Actor started state_name="Cart" size=1
//! WARN Action failed state_name="Cart" error=Requested quantity is out of stock
//! INFO Shutdown state_name="Cart" size=1
//! ```
//!
//! Logs go to stderr so the CLI's stdout carries only the cart.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // state_name identifies the actor instead
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
