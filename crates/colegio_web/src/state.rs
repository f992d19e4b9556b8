//! Shared application state.
//!
//! # Responsibility
//! - Own the single SQLite connection behind a mutex.
//! - Bundle the store, GraphQL schema and page templates for axum handlers.
//!
//! # Invariants
//! - Every handler and resolver reaches the database through
//!   [`Store::with_service`]; one call holds the lock for its whole run.
//! - The connection is closed explicitly with [`Store::close`] on shutdown.

use crate::error::WebError;
use crate::graphql::{build_schema, SchoolSchema};
use crate::views::Views;
use colegio_core::db::{close_db, open_db_in_memory, Connection, DbResult};
use colegio_core::{RepoResult, SchoolService};
use log::warn;
use std::sync::{Arc, Mutex, PoisonError};

/// Registry storage shared by the router and the GraphQL schema.
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Wraps an already migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Fresh migrated in-memory store.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    /// Runs `operation` against a service bound to the locked connection.
    ///
    /// A poisoned lock is recovered: SQLite rolls back any transaction the
    /// panicking holder left open, so the connection stays consistent.
    pub fn with_service<T>(
        &self,
        operation: impl FnOnce(&SchoolService<'_>) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let conn = self.conn.lock().unwrap_or_else(|poisoned| {
            warn!("event=store_lock module=web status=recovered reason=poisoned");
            PoisonError::into_inner(poisoned)
        });
        let service = SchoolService::try_new(&conn)?;
        operation(&service)
    }

    /// Closes the underlying connection.
    pub fn close(self) -> DbResult<()> {
        let conn = self
            .conn
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        close_db(conn)
    }
}

/// State handed to every axum handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub schema: SchoolSchema,
    pub views: Arc<Views>,
}

impl AppState {
    pub fn new(store: Arc<Store>) -> Result<Self, WebError> {
        let views = Views::new()?;
        let schema = build_schema(Arc::clone(&store));
        Ok(Self {
            store,
            schema,
            views: Arc::new(views),
        })
    }
}
