use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;

use service::catalog::CatalogFilter;
use service::pages::{self, PageOutcome};

use crate::errors::ApiError;
use crate::extract::SessionToken;
use crate::state::ServerState;

fn render<T: Serialize>(outcome: PageOutcome<T>) -> Response {
    match outcome {
        PageOutcome::Render(view) => Json(view).into_response(),
        // 303 See Other
        PageOutcome::Redirect(to) => Redirect::to(&to).into_response(),
    }
}

pub async fn servicios(
    State(state): State<ServerState>,
    token: SessionToken,
    Query(filter): Query<CatalogFilter>,
) -> Result<Response, ApiError> {
    let outcome = pages::servicios::load(&state.pages, &*state.catalog, &state.views, token.as_deref(), &filter).await?;
    Ok(render(outcome))
}

pub async fn perfil(State(state): State<ServerState>, token: SessionToken) -> Result<Response, ApiError> {
    let outcome = pages::perfil::load(&state.pages, &*state.profiles, token.as_deref()).await?;
    Ok(render(outcome))
}
