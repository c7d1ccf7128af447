use anyhow::{anyhow, Result};
use axum::{routing::get, Router};
use sea_orm::DatabaseConnection;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

#[cfg(feature = "graphql")]
use crate::graphql::{build_schema, GraphQLContext, GraphQLSchema};
#[cfg(feature = "graphql")]
use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
};

use super::handlers::health;

#[derive(Clone)]
pub struct AppState {
    #[cfg(feature = "graphql")]
    pub graphql_schema: GraphQLSchema,
}

#[cfg_attr(not(feature = "graphql"), allow(unused_variables))]
pub async fn create_app(db: DatabaseConnection, cors_origin: Option<&str>) -> Result<Router> {
    let state = AppState {
        #[cfg(feature = "graphql")]
        graphql_schema: build_schema(GraphQLContext::new(db)),
    };

    let cors = match cors_origin {
        Some(origin) if origin != "*" => CorsLayer::new()
            .allow_origin(
                origin
                    .parse::<axum::http::HeaderValue>()
                    .map_err(|e| anyhow!("Invalid CORS origin: {}", e))?,
            )
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers(Any)
            .allow_credentials(false),
        _ => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers(Any)
            .allow_credentials(false),
    };

    #[allow(unused_mut)]
    let mut app = Router::new().route("/health", get(health::health_check));

    #[cfg(feature = "graphql")]
    {
        app = app.route(
            "/graphql",
            get(graphql_get_handler)
                .post(graphql_post_handler)
                .options(|| async { StatusCode::OK }),
        );
    }

    let app = app
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state);

    Ok(app)
}

#[cfg(feature = "graphql")]
async fn execute(state: &AppState, request: async_graphql::Request) -> Response {
    tracing::debug!("GraphQL request received");
    let response = state.graphql_schema.execute(request).await;
    tracing::debug!("GraphQL request completed");
    Json(response).into_response()
}

#[cfg(feature = "graphql")]
fn bad_request(err: impl std::fmt::Display) -> Response {
    tracing::warn!("Rejected GraphQL request: {}", err);
    (StatusCode::BAD_REQUEST, err.to_string()).into_response()
}

/// With no query string there is nothing to run, so serve the playground.
#[cfg(feature = "graphql")]
async fn graphql_get_handler(State(state): State<AppState>, RawQuery(raw): RawQuery) -> Response {
    match raw.as_deref().filter(|q| !q.is_empty()) {
        None => Html(async_graphql::http::playground_source(
            async_graphql::http::GraphQLPlaygroundConfig::new("/graphql"),
        ))
        .into_response(),
        Some(query) => match async_graphql::http::parse_query_string(query) {
            Ok(request) => execute(&state, request).await,
            Err(err) => bad_request(err),
        },
    }
}

/// JSON body first. The bench front-end posts mutations with an empty body
/// and the request in the URL, so fall back to the query string.
#[cfg(feature = "graphql")]
async fn graphql_post_handler(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
    body: Bytes,
) -> Response {
    let request = if body.is_empty() {
        async_graphql::http::parse_query_string(raw.as_deref().unwrap_or_default())
            .map_err(|e| e.to_string())
    } else {
        serde_json::from_slice::<async_graphql::Request>(&body).map_err(|e| e.to_string())
    };

    match request {
        Ok(request) => execute(&state, request).await,
        Err(err) => bad_request(err),
    }
}
