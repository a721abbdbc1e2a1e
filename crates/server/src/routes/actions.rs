//! Mutation endpoints. Every response is an [`Envelope`]; malformed
//! bodies and ids become `ValidationError` once the caller is authenticated.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use service::actions;
use service::catalog::domain::{CatalogChanges, NewServicio, NewSubservicio};
use service::catalog::{Servicio, Subservicio};
use service::envelope::ActionError;
use service::profile::{Profile, ProfilePatch};

use crate::errors::Envelope;
use crate::extract::SessionToken;
use crate::state::ServerState;

/// Authenticate as usual, then fail with the rejection text.
async fn rejected<T>(state: &ServerState, name: &'static str, token: &SessionToken, message: String) -> Envelope<T> {
    let res = state
        .mutations
        .run(name, token.as_deref(), &[], move |_| async move { Err::<T, _>(ActionError::validation(message)) })
        .await;
    Envelope(res)
}

pub async fn update_profile(
    State(state): State<ServerState>,
    token: SessionToken,
    body: Result<Json<ProfilePatch>, JsonRejection>,
) -> Envelope<Profile> {
    let patch = match body {
        Ok(Json(patch)) => patch,
        Err(e) => return rejected(&state, "update_profile", &token, e.body_text()).await,
    };
    Envelope(actions::profile::update_profile(&state.mutations, &*state.profiles, token.as_deref(), patch).await)
}

pub async fn create_servicio(
    State(state): State<ServerState>,
    token: SessionToken,
    body: Result<Json<NewServicio>, JsonRejection>,
) -> Envelope<Servicio> {
    let input = match body {
        Ok(Json(input)) => input,
        Err(e) => return rejected(&state, "create_servicio", &token, e.body_text()).await,
    };
    Envelope(actions::catalog::create_servicio(&state.mutations, &*state.catalog, token.as_deref(), input).await)
}

pub async fn update_servicio(
    State(state): State<ServerState>,
    token: SessionToken,
    id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<CatalogChanges>, JsonRejection>,
) -> Envelope<Servicio> {
    let (id, changes) = match (id, body) {
        (Ok(Path(id)), Ok(Json(changes))) => (id, changes),
        (Err(e), _) => return rejected(&state, "update_servicio", &token, e.body_text()).await,
        (_, Err(e)) => return rejected(&state, "update_servicio", &token, e.body_text()).await,
    };
    Envelope(actions::catalog::update_servicio(&state.mutations, &*state.catalog, token.as_deref(), id, changes).await)
}

pub async fn delete_servicio(
    State(state): State<ServerState>,
    token: SessionToken,
    id: Result<Path<Uuid>, PathRejection>,
) -> Envelope<Uuid> {
    let id = match id {
        Ok(Path(id)) => id,
        Err(e) => return rejected(&state, "delete_servicio", &token, e.body_text()).await,
    };
    Envelope(actions::catalog::delete_servicio(&state.mutations, &*state.catalog, token.as_deref(), id).await)
}

pub async fn create_subservicio(
    State(state): State<ServerState>,
    token: SessionToken,
    body: Result<Json<NewSubservicio>, JsonRejection>,
) -> Envelope<Subservicio> {
    let input = match body {
        Ok(Json(input)) => input,
        Err(e) => return rejected(&state, "create_subservicio", &token, e.body_text()).await,
    };
    Envelope(actions::catalog::create_subservicio(&state.mutations, &*state.catalog, token.as_deref(), input).await)
}

pub async fn update_subservicio(
    State(state): State<ServerState>,
    token: SessionToken,
    id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<CatalogChanges>, JsonRejection>,
) -> Envelope<Subservicio> {
    let (id, changes) = match (id, body) {
        (Ok(Path(id)), Ok(Json(changes))) => (id, changes),
        (Err(e), _) => return rejected(&state, "update_subservicio", &token, e.body_text()).await,
        (_, Err(e)) => return rejected(&state, "update_subservicio", &token, e.body_text()).await,
    };
    let res = actions::catalog::update_subservicio(&state.mutations, &*state.catalog, token.as_deref(), id, changes).await;
    Envelope(res)
}

pub async fn delete_subservicio(
    State(state): State<ServerState>,
    token: SessionToken,
    id: Result<Path<Uuid>, PathRejection>,
) -> Envelope<Uuid> {
    let id = match id {
        Ok(Path(id)) => id,
        Err(e) => return rejected(&state, "delete_subservicio", &token, e.body_text()).await,
    };
    Envelope(actions::catalog::delete_subservicio(&state.mutations, &*state.catalog, token.as_deref(), id).await)
}
