//! GraphQL surface for the channel/message dataset.
//!
//! - [`QueryRoot`]: read operations (listings and single lookups)
//! - [`MutationRoot`]: write operations (creates and cascading deletes)
//!
//! Resolvers translate each operation into statements against the shared
//! [`Store`]; blocking SQLite work runs on the blocking thread pool.

mod mutation;
mod query;
mod types;

pub use mutation::MutationRoot;
pub use query::QueryRoot;
pub use types::{Channel, CreateChannelInput, CreateMessageInput, Message};

use std::sync::Arc;

use async_graphql::{EmptySubscription, Schema};
use parley_db::Store;

pub type ParleySchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema over one shared store handle. The store rides along as
/// schema data and every resolver pulls it from the request context.
pub fn build_schema(store: Arc<Store>) -> ParleySchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(store)
        .finish()
}

#[cfg(test)]
pub(crate) fn test_schema() -> ParleySchema {
    build_schema(Arc::new(Store::open_in_memory().unwrap()))
}
