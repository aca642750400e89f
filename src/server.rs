// Copyright 2025 coScene
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// HTTP surface: thin routing over the store dispatcher
//
// Write paths surface store failures as 500s; read paths always return
// something (lenient parsing happens inside the stores). Unknown
// backend selectors are a silent redirect to the landing view, never an
// error.

use crate::protocol::{
    ErrorResponse, LandingResponse, RecordsResponse, SaveQuery, SavedResponse, SubmitForm,
};
use crate::store::{Selector, StoreError, StoreSet};
use anyhow::Result;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use std::sync::Arc;
use tracing::{info, warn};

pub fn router(stores: Arc<StoreSet>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/submit", post(submit))
        .route("/save/:backend", get(save))
        .route("/records/:backend", get(records))
        .with_state(stores)
}

/// Bind and serve until the task is cancelled.
pub async fn run(bind_addr: &str, stores: Arc<StoreSet>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router(stores)).await?;
    Ok(())
}

async fn index() -> Json<LandingResponse> {
    Json(LandingResponse {
        message: "form-recorder".to_string(),
        backends: Selector::ALL.iter().map(|s| s.as_str()).collect(),
    })
}

async fn submit(State(stores): State<Arc<StoreSet>>, Form(form): Form<SubmitForm>) -> Response {
    let Some(selector) = Selector::parse(&form.backend) else {
        // Unknown selector: no write, no error, back to the landing view
        warn!("Unknown backend selector '{}', ignoring submission", form.backend);
        return Redirect::to("/").into_response();
    };

    let (name, email) = resolve_submission(selector, form.name.as_deref(), form.email.as_deref());
    match stores.get(selector).append(name, email).await {
        Ok(_) => Redirect::to(&format!("/records/{}", selector.as_str())).into_response(),
        Err(e) => store_error(e),
    }
}

async fn save(
    Path(backend): Path<String>,
    Query(query): Query<SaveQuery>,
    State(stores): State<Arc<StoreSet>>,
) -> Response {
    let Some(selector) = Selector::parse(&backend) else {
        return Redirect::to("/").into_response();
    };

    let (name, email) = resolve_submission(selector, query.name.as_deref(), query.email.as_deref());
    match stores.get(selector).append(name, email).await {
        Ok(record) => Json(SavedResponse {
            message: format!("Saved to {} backend", selector.as_str()),
            record,
        })
        .into_response(),
        Err(e) => store_error(e),
    }
}

async fn records(Path(backend): Path<String>, State(stores): State<Arc<StoreSet>>) -> Response {
    let Some(selector) = Selector::parse(&backend) else {
        return Redirect::to("/").into_response();
    };

    let store = stores.get(selector);
    match store.list_all().await {
        Ok(records) => Json(RecordsResponse {
            message: format!("Contents of {} backend", selector.as_str()),
            columns: store.columns().to_vec(),
            records,
        })
        .into_response(),
        Err(e) => store_error(e),
    }
}

/// Fall back to the backend's fixed defaults when a field is absent or
/// blank.
fn resolve_submission<'a>(
    selector: Selector,
    name: Option<&'a str>,
    email: Option<&'a str>,
) -> (&'a str, &'a str) {
    let (default_name, default_email) = selector.default_submission();
    (
        name.filter(|s| !s.is_empty()).unwrap_or(default_name),
        email.filter(|s| !s.is_empty()).unwrap_or(default_email),
    )
}

fn store_error(err: StoreError) -> Response {
    warn!("Store operation failed: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}
