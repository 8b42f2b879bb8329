//! Handler trait for the dispatcher.
//!
//! Handler groups are run in registration order; the first group that
//! returns [`HandlerFlow::Handled`] consumes the update.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::Update;

/// Whether a handler group consumed the update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerFlow {
    /// The update was consumed; stop dispatching.
    Handled,
    /// Not for this group; try the next one.
    Pass,
}

/// A group of related update handlers (e.g. all DM flows).
#[async_trait]
pub trait UpdateHandler: Send + Sync {
    async fn handle(&self, update: &Update) -> Result<HandlerFlow>;
}
