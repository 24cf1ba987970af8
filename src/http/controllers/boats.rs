use actix_web::{
    http::header,
    web::{self, Json},
    HttpResponse,
};
use thiserror::Error;

use crate::{
    auth::{Actor, Role},
    error::{Error, Result},
    http::CsrfChecked,
    types::{
        form::{BoatForm, ListBoats},
        id::BoatId,
    },
    App,
};

pub const BASE_PATH: &str = "/api/v1/boats";

#[derive(Debug, Error)]
#[error("Boat does not exist")]
struct BoatNotFound;

fn not_found() -> Error {
    Error::from_context(crate::types::Error::NotFound, BoatNotFound)
}

/// Ids start at 1, so a zero in the path can only be a missing boat.
/// Anonymous callers still get `401` for it.
fn boat_id(actor: &Actor, id: u64) -> Result<BoatId> {
    actor.require_role(Role::User)?;
    BoatId::new_checked(id).ok_or_else(not_found)
}

#[tracing::instrument(skip(app, actor))]
pub async fn list(
    app: web::Data<App>,
    actor: Actor,
    query: web::Query<ListBoats>,
) -> Result<HttpResponse> {
    let page = app.boats.list(&actor, &query).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[tracing::instrument(skip(app, actor))]
pub async fn get(app: web::Data<App>, actor: Actor, id: web::Path<u64>) -> Result<HttpResponse> {
    let id = boat_id(&actor, id.into_inner())?;
    let boat = app.boats.get(&actor, id).await?.ok_or_else(not_found)?;
    Ok(HttpResponse::Ok().json(boat))
}

#[tracing::instrument(skip(app, actor, _csrf))]
pub async fn create(
    app: web::Data<App>,
    actor: Actor,
    _csrf: CsrfChecked,
    form: Json<BoatForm>,
) -> Result<HttpResponse> {
    let boat = app.boats.create(&actor, &form.as_input()).await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("{BASE_PATH}/{}", boat.id)))
        .json(boat))
}

#[tracing::instrument(skip(app, actor, _csrf))]
pub async fn update_name(
    app: web::Data<App>,
    actor: Actor,
    _csrf: CsrfChecked,
    id: web::Path<u64>,
    form: Json<BoatForm>,
) -> Result<HttpResponse> {
    let id = boat_id(&actor, id.into_inner())?;
    let boat = app
        .boats
        .update_name(&actor, id, form.name.as_deref())
        .await?
        .ok_or_else(not_found)?;

    Ok(HttpResponse::Ok().json(boat))
}

#[tracing::instrument(skip(app, actor, _csrf))]
pub async fn update_description(
    app: web::Data<App>,
    actor: Actor,
    _csrf: CsrfChecked,
    id: web::Path<u64>,
    form: Json<BoatForm>,
) -> Result<HttpResponse> {
    let id = boat_id(&actor, id.into_inner())?;
    let boat = app
        .boats
        .update_description(&actor, id, form.description.as_deref())
        .await?
        .ok_or_else(not_found)?;

    Ok(HttpResponse::Ok().json(boat))
}

#[tracing::instrument(skip(app, actor, _csrf))]
pub async fn update_type(
    app: web::Data<App>,
    actor: Actor,
    _csrf: CsrfChecked,
    id: web::Path<u64>,
    form: Json<BoatForm>,
) -> Result<HttpResponse> {
    let id = boat_id(&actor, id.into_inner())?;
    let boat = app
        .boats
        .update_type(&actor, id, form.boat_type.as_deref())
        .await?
        .ok_or_else(not_found)?;

    Ok(HttpResponse::Ok().json(boat))
}

#[tracing::instrument(skip(app, actor, _csrf))]
pub async fn delete(
    app: web::Data<App>,
    actor: Actor,
    _csrf: CsrfChecked,
    id: web::Path<u64>,
) -> Result<HttpResponse> {
    let id = boat_id(&actor, id.into_inner())?;
    if app.boats.delete(&actor, id).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(not_found())
    }
}
