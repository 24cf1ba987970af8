//! Record store adapter.
//!
//! Services only see [`BoatStore`] and [`PrincipalStore`]. The
//! in-memory backend serves tests and database-less setups, the
//! PostgreSQL backend serves everything else.
use async_trait::async_trait;
use std::fmt::Debug;

use crate::schema::{Boat, NewBoat, NewPrincipal, Page, PageRequest, Principal};
use crate::types::id::BoatId;

mod error;
pub mod memory;
pub mod postgres;

pub use error::*;
pub use memory::{MemoryBoatStore, MemoryPrincipalStore};
pub use postgres::{PgBoatStore, PgPrincipalStore, Pool};

#[async_trait]
pub trait BoatStore: Debug + Send + Sync {
    /// Persists a new boat and returns it with its generated id.
    ///
    /// Fails with [`Error::Conflict`] if the name is already taken.
    async fn create(&self, boat: NewBoat) -> Result<Boat>;

    async fn find_by_id(&self, id: BoatId) -> Result<Option<Boat>>;

    /// Sorted by the requested field, ties broken by ascending id.
    async fn find_all(&self, request: &PageRequest) -> Result<Page<Boat>>;

    /// Inserts or replaces the boat with the same id. `created_at`
    /// of an already stored boat is kept.
    async fn save(&self, boat: &Boat) -> Result<Boat>;

    async fn delete_by_id(&self, id: BoatId) -> Result<()>;

    async fn exists_by_id(&self, id: BoatId) -> Result<bool>;
}

#[async_trait]
pub trait PrincipalStore: Debug + Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<Principal>>;

    async fn exists_by_username(&self, username: &str) -> Result<bool>;

    async fn create(&self, principal: NewPrincipal) -> Result<Principal>;
}
