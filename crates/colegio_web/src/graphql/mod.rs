//! GraphQL schema over the registry.
//!
//! # Responsibility
//! - Expose list, get-by-id and report queries plus create/update/delete
//!   mutations for every record type.
//! - Keep the public field and argument names (`oficinas`, `numEmpleados`,
//!   `areaId`, ...) stable for existing clients.
//!
//! # Invariants
//! - Resolvers reach storage only through the [`Store`] injected as schema
//!   data; there is no global schema or connection.
//! - Get-by-id queries resolve to `null` for an absent id without errors.

use crate::state::Store;
use async_graphql::{Context, EmptySubscription, Schema};
use std::sync::Arc;

mod mutation;
mod query;
mod types;

pub use mutation::MutationRoot;
pub use query::QueryRoot;

pub type SchoolSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(store: Arc<Store>) -> SchoolSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(store)
        .finish()
}

fn store<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a Arc<Store>> {
    ctx.data::<Arc<Store>>()
}
