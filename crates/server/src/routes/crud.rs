//! Generic CRUD handlers shared by every resource, gated by a role policy.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use configs::settings::SystemSettings;
use models::Role;
use service::auth::domain::Claims;
use service::pagination::{PaginatedList, Pagination};
use service::CrudService;

use crate::errors::JsonApiError;
use crate::state::ServerState;

/// Roles allowed per action. An empty list admits any authenticated caller.
#[derive(Clone, Copy, Debug)]
pub struct Policy {
    pub read: &'static [Role],
    pub write: &'static [Role],
    pub remove: &'static [Role],
}

impl Policy {
    const fn open_reads(write: &'static [Role], remove: &'static [Role]) -> Self {
        Self { read: &[], write, remove }
    }
}

pub mod policies {
    use super::Policy;
    use models::Role::{Admin, Customer, LaundryStore, Staff};

    pub const CUSTOMER: Policy = Policy::open_reads(&[Admin, Customer], &[Admin]);
    pub const LAUNDRY_STORE: Policy = Policy::open_reads(&[Admin, LaundryStore], &[Admin]);
    pub const STAFF_TRIP: Policy = Policy::open_reads(&[Admin, Staff], &[Admin, Staff]);
    pub const ORDER: Policy = Policy::open_reads(&[Admin, Customer, Staff], &[Admin]);
    pub const ADMIN_ONLY: Policy = Policy::open_reads(&[Admin], &[Admin]);
}

fn authorize(allowed: &[Role], claims: &Claims) -> Result<(), JsonApiError> {
    if allowed.is_empty() || allowed.contains(&claims.role) {
        return Ok(());
    }
    tracing::warn!(user = %claims.sub, role = %claims.role, "role not permitted");
    Err(JsonApiError::forbidden())
}

pub struct Resource<S> {
    svc: Arc<S>,
    policy: Policy,
}

impl<S> Clone for Resource<S> {
    fn clone(&self) -> Self {
        Self { svc: Arc::clone(&self.svc), policy: self.policy }
    }
}

/// `/`, `/paginated` and `/:id` for one service.
pub fn router<S: CrudService>(svc: Arc<S>, policy: Policy) -> Router<ServerState> {
    Router::new()
        .route("/", get(list::<S>).post(create::<S>))
        .route("/paginated", get(paginated::<S>))
        .route("/:id", get(get_one::<S>).put(update::<S>).delete(remove::<S>))
        .with_state(Resource { svc, policy })
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub order_by: Option<String>,
}

async fn list<S: CrudService>(
    State(res): State<Resource<S>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<S::Listed>>, JsonApiError> {
    authorize(res.policy.read, &claims)?;
    Ok(Json(res.svc.get_all().await?))
}

async fn paginated<S: CrudService>(
    State(res): State<Resource<S>>,
    Extension(claims): Extension<Claims>,
    WithRejection(Query(q), _): WithRejection<Query<PageQuery>, JsonApiError>,
) -> Result<Json<PaginatedList<S::Model>>, JsonApiError> {
    authorize(res.policy.read, &claims)?;
    let size = q.size.unwrap_or_else(|| SystemSettings::current().default_page_size);
    let page = Pagination::new(q.page.unwrap_or(1), size);
    Ok(Json(res.svc.get_paginated(page, q.order_by.as_deref()).await?))
}

async fn get_one<S: CrudService>(
    State(res): State<Resource<S>>,
    Extension(claims): Extension<Claims>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, JsonApiError>,
) -> Result<Json<S::Detail>, JsonApiError> {
    authorize(res.policy.read, &claims)?;
    res.svc
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| JsonApiError::not_found(format!("no record with id {id}")))
}

async fn create<S: CrudService>(
    State(res): State<Resource<S>>,
    Extension(claims): Extension<Claims>,
    WithRejection(Json(input), _): WithRejection<Json<S::Input>, JsonApiError>,
) -> Result<(StatusCode, Json<Value>), JsonApiError> {
    authorize(res.policy.write, &claims)?;
    let id = res.svc.create(input).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

async fn update<S: CrudService>(
    State(res): State<Resource<S>>,
    Extension(claims): Extension<Claims>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, JsonApiError>,
    WithRejection(Json(input), _): WithRejection<Json<S::Input>, JsonApiError>,
) -> Result<Json<Value>, JsonApiError> {
    authorize(res.policy.write, &claims)?;
    affected(id, res.svc.update(id, input).await?)
}

async fn remove<S: CrudService>(
    State(res): State<Resource<S>>,
    Extension(claims): Extension<Claims>,
    WithRejection(Path(id), _): WithRejection<Path<Uuid>, JsonApiError>,
) -> Result<Json<Value>, JsonApiError> {
    authorize(res.policy.remove, &claims)?;
    affected(id, res.svc.delete(id).await?)
}

fn affected(id: Uuid, n: u64) -> Result<Json<Value>, JsonApiError> {
    if n == 0 {
        return Err(JsonApiError::not_found(format!("no record with id {id}")));
    }
    Ok(Json(json!({ "affected": n })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: Role) -> Claims {
        Claims {
            sub: Uuid::new_v4().to_string(),
            name: "t".into(),
            role,
            iss: "i".into(),
            aud: "a".into(),
            iat: 0,
            exp: 0,
        }
    }

    #[test]
    fn policies_gate_writes_by_role() {
        assert!(authorize(policies::ORDER.write, &claims(Role::Staff)).is_ok());
        assert!(authorize(policies::ORDER.remove, &claims(Role::Staff)).is_err());
        assert!(authorize(policies::STAFF_TRIP.remove, &claims(Role::Staff)).is_ok());
        assert!(authorize(policies::LAUNDRY_STORE.write, &claims(Role::Customer)).is_err());
        assert!(authorize(policies::ADMIN_ONLY.write, &claims(Role::Admin)).is_ok());
    }

    #[test]
    fn reads_open_to_every_role() {
        for role in [Role::Admin, Role::Staff, Role::Customer, Role::LaundryStore] {
            assert!(authorize(policies::CUSTOMER.read, &claims(role)).is_ok());
        }
    }

    #[test]
    fn zero_rows_is_not_found() {
        let err = affected(Uuid::nil(), 0).unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(affected(Uuid::nil(), 1).unwrap().0["affected"], 1);
    }
}
