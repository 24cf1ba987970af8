use std::sync::Arc;

use crate::auth::{Actor, Role};
use crate::error::Result;
use crate::schema::{Boat, BoatType, NewBoat, Page};
use crate::store::BoatStore;
use crate::types::form::{BoatField, BoatInput, ListBoats};
use crate::types::id::BoatId;
use crate::types::validation::{self, Validate, ValidateError};
use crate::types::Timestamp;

/// Turns validated boat input into store mutations.
///
/// Every operation first checks that the actor holds the `USER` role,
/// then validates its input, and only then touches the store. Lookups
/// of a missing boat are `None`, never an error.
#[derive(Debug, Clone)]
pub struct BoatService {
    store: Arc<dyn BoatStore>,
}

impl BoatService {
    #[must_use]
    pub fn new(store: Arc<dyn BoatStore>) -> Self {
        Self { store }
    }

    #[tracing::instrument(skip_all, name = "boats.list")]
    pub async fn list(&self, actor: &Actor, query: &ListBoats) -> Result<Page<Boat>> {
        actor.require_role(Role::User)?;
        let request = query.to_page_request()?;
        Ok(self.store.find_all(&request).await?)
    }

    #[tracing::instrument(skip(self, actor), name = "boats.get")]
    pub async fn get(&self, actor: &Actor, id: BoatId) -> Result<Option<Boat>> {
        actor.require_role(Role::User)?;
        Ok(self.store.find_by_id(id).await?)
    }

    #[tracing::instrument(skip_all, name = "boats.create")]
    pub async fn create(&self, actor: &Actor, input: &BoatInput<'_>) -> Result<Boat> {
        actor.require_role(Role::User)?;
        input.validate()?;

        let now = Timestamp::now();
        let boat = NewBoat {
            name: input.name.unwrap_or_default().to_string(),
            description: input.description.map(str::to_string),
            boat_type: coerce_type(input.boat_type)?,
            created_at: now,
            updated_at: now,
        };

        let boat = self.store.create(boat).await?;
        tracing::info!(id = %boat.id, "created boat");
        Ok(boat)
    }

    #[tracing::instrument(skip(self, actor, name), name = "boats.update_name")]
    pub async fn update_name(
        &self,
        actor: &Actor,
        id: BoatId,
        name: Option<&str>,
    ) -> Result<Option<Boat>> {
        actor.require_role(Role::User)?;
        BoatInput::name(name).validate_fields(&[BoatField::Name])?;

        let name = name.unwrap_or_default().to_string();
        self.modify(id, move |boat| boat.name = name).await
    }

    #[tracing::instrument(skip(self, actor, description), name = "boats.update_description")]
    pub async fn update_description(
        &self,
        actor: &Actor,
        id: BoatId,
        description: Option<&str>,
    ) -> Result<Option<Boat>> {
        actor.require_role(Role::User)?;
        BoatInput::description(description).validate_fields(&[BoatField::Description])?;

        let description = description.map(str::to_string);
        self.modify(id, move |boat| boat.description = description)
            .await
    }

    /// Trims and uppercases `boat_type` before matching it against the
    /// known types. An unknown type fails the whole operation.
    #[tracing::instrument(skip(self, actor), name = "boats.update_type")]
    pub async fn update_type(
        &self,
        actor: &Actor,
        id: BoatId,
        boat_type: Option<&str>,
    ) -> Result<Option<Boat>> {
        actor.require_role(Role::User)?;
        BoatInput::boat_type(boat_type).validate_fields(&[BoatField::Type])?;

        let boat_type = coerce_type(boat_type)?;
        self.modify(id, move |boat| boat.boat_type = boat_type)
            .await
    }

    /// Returns whether a boat existed and got removed.
    #[tracing::instrument(skip(self, actor), name = "boats.delete")]
    pub async fn delete(&self, actor: &Actor, id: BoatId) -> Result<bool> {
        actor.require_role(Role::User)?;
        if !self.store.exists_by_id(id).await? {
            return Ok(false);
        }

        self.store.delete_by_id(id).await?;
        tracing::info!("deleted boat");
        Ok(true)
    }

    /// Read, change one field, bump `updated_at`, write back. Two
    /// concurrent updates of the same boat race and the last one wins.
    async fn modify(
        &self,
        id: BoatId,
        change: impl FnOnce(&mut Boat) + Send,
    ) -> Result<Option<Boat>> {
        let Some(mut boat) = self.store.find_by_id(id).await? else {
            return Ok(None);
        };

        change(&mut boat);
        boat.updated_at = Timestamp::now_after(boat.updated_at);

        Ok(Some(self.store.save(&boat).await?))
    }
}

fn coerce_type(value: Option<&str>) -> Result<BoatType> {
    let field = BoatField::Type.as_str();
    let Some(value) = value else {
        return Err(ValidateError::field(field, validation::TYPE_REQUIRED).into());
    };

    BoatType::coerce(value)
        .ok_or_else(|| ValidateError::field(field, validation::TYPE_INVALID).into())
}
