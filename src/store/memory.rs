use async_trait::async_trait;
use error_stack::Report;
use std::{
    cmp::Ordering,
    collections::BTreeMap,
    sync::atomic::{AtomicU64, Ordering as AtomicOrdering},
};
use tokio::sync::RwLock;

use super::{BoatStore, Error, PrincipalStore, Result};
use crate::schema::{
    Boat, NewBoat, NewPrincipal, Page, PageRequest, Principal, SortDirection, SortField,
};
use crate::types::id::{marker::Marker, BoatId, Id, PrincipalId};

#[derive(Debug, thiserror::Error)]
#[error("name {0:?} is already taken")]
struct NameTaken(String);

fn next_id<T: Marker>(sequence: &AtomicU64) -> Result<Id<T>> {
    let value = sequence.fetch_add(1, AtomicOrdering::Relaxed);
    Id::new_checked(value).ok_or_else(|| Report::new(Error::SequenceExhausted))
}

/// Keeps boats in a map guarded by a single lock, so every operation
/// is atomic with respect to the others.
#[derive(Debug)]
pub struct MemoryBoatStore {
    boats: RwLock<BTreeMap<BoatId, Boat>>,
    sequence: AtomicU64,
}

#[allow(clippy::new_without_default)]
impl MemoryBoatStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            boats: RwLock::default(),
            sequence: AtomicU64::new(1),
        }
    }
}

/// Orders two boats the way PostgreSQL would: missing descriptions
/// come last when ascending and first when descending, equal keys
/// fall back to ascending id.
fn compare(field: SortField, direction: SortDirection, a: &Boat, b: &Boat) -> Ordering {
    let ordering = match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Name => a.name.cmp(&b.name),
        SortField::BoatType => a.boat_type.as_str().cmp(b.boat_type.as_str()),
        SortField::Description => match (&a.description, &b.description) {
            (Some(a), Some(b)) => a.cmp(b),
            (Some(..), None) => Ordering::Less,
            (None, Some(..)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    };
    let ordering = match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    };
    ordering.then_with(|| a.id.cmp(&b.id))
}

fn ensure_unique_name(
    boats: &BTreeMap<BoatId, Boat>,
    name: &str,
    except: Option<BoatId>,
) -> Result<()> {
    let taken = boats
        .values()
        .any(|boat| boat.name == name && Some(boat.id) != except);

    if taken {
        Err(Report::new(NameTaken(name.to_string())).change_context(Error::Conflict))
    } else {
        Ok(())
    }
}

#[async_trait]
impl BoatStore for MemoryBoatStore {
    #[tracing::instrument(skip_all, name = "store.memory.boats.create")]
    async fn create(&self, boat: NewBoat) -> Result<Boat> {
        let mut boats = self.boats.write().await;
        ensure_unique_name(&boats, &boat.name, None)?;

        let boat = boat.into_boat(next_id(&self.sequence)?);
        boats.insert(boat.id, boat.clone());
        Ok(boat)
    }

    #[tracing::instrument(skip(self), name = "store.memory.boats.find_by_id")]
    async fn find_by_id(&self, id: BoatId) -> Result<Option<Boat>> {
        Ok(self.boats.read().await.get(&id).cloned())
    }

    #[tracing::instrument(skip(self), name = "store.memory.boats.find_all")]
    async fn find_all(&self, request: &PageRequest) -> Result<Page<Boat>> {
        let boats = self.boats.read().await;

        let mut sorted = boats.values().collect::<Vec<_>>();
        sorted.sort_by(|a, b| compare(request.sort.field, request.sort.direction, a, b));

        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let content = sorted
            .into_iter()
            .skip(offset)
            .take(request.size as usize)
            .cloned()
            .collect::<Vec<_>>();

        Ok(Page::new(content, request, boats.len() as u64))
    }

    #[tracing::instrument(skip_all, fields(id = %boat.id), name = "store.memory.boats.save")]
    async fn save(&self, boat: &Boat) -> Result<Boat> {
        let mut boats = self.boats.write().await;
        ensure_unique_name(&boats, &boat.name, Some(boat.id))?;

        let mut saved = boat.clone();
        if let Some(existing) = boats.get(&boat.id) {
            saved.created_at = existing.created_at;
        } else {
            // keep generated ids ahead of explicitly saved ones
            self.sequence
                .fetch_max(boat.id.get() + 1, AtomicOrdering::Relaxed);
        }
        boats.insert(saved.id, saved.clone());
        Ok(saved)
    }

    #[tracing::instrument(skip(self), name = "store.memory.boats.delete_by_id")]
    async fn delete_by_id(&self, id: BoatId) -> Result<()> {
        self.boats.write().await.remove(&id);
        Ok(())
    }

    #[tracing::instrument(skip(self), name = "store.memory.boats.exists_by_id")]
    async fn exists_by_id(&self, id: BoatId) -> Result<bool> {
        Ok(self.boats.read().await.contains_key(&id))
    }
}

// ---------------------------------------------------- //

#[derive(Debug)]
pub struct MemoryPrincipalStore {
    principals: RwLock<Vec<Principal>>,
    sequence: AtomicU64,
}

#[allow(clippy::new_without_default)]
impl MemoryPrincipalStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            principals: RwLock::default(),
            sequence: AtomicU64::new(1),
        }
    }
}

#[async_trait]
impl PrincipalStore for MemoryPrincipalStore {
    #[tracing::instrument(skip_all, name = "store.memory.principals.find_by_username")]
    async fn find_by_username(&self, username: &str) -> Result<Option<Principal>> {
        let principals = self.principals.read().await;
        Ok(principals.iter().find(|v| v.username == username).cloned())
    }

    #[tracing::instrument(skip_all, name = "store.memory.principals.exists_by_username")]
    async fn exists_by_username(&self, username: &str) -> Result<bool> {
        let principals = self.principals.read().await;
        Ok(principals.iter().any(|v| v.username == username))
    }

    #[tracing::instrument(skip_all, name = "store.memory.principals.create")]
    async fn create(&self, principal: NewPrincipal) -> Result<Principal> {
        let mut principals = self.principals.write().await;
        if principals.iter().any(|v| v.username == principal.username) {
            let report = Report::new(NameTaken(principal.username));
            return Err(report.change_context(Error::Conflict));
        }

        let id: PrincipalId = next_id(&self.sequence)?;
        let principal = principal.into_principal(id);
        principals.push(principal.clone());
        Ok(principal)
    }
}
