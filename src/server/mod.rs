mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, patch, post},
    Router,
};

use crate::api::API;
use crate::error::{unexpected_error, Error};
use crate::server::handlers::{points, routes, session};

type DynAPI = Arc<dyn API + Send + Sync>;

pub fn router<T: API + Sync + Send + 'static>(api: T) -> Router {
    let api = Arc::new(api) as DynAPI;

    Router::new()
        .route("/points/:mode", get(points::list))
        .route("/points/:mode/filter", post(points::filter))
        .route("/points/:mode/nearest", post(points::nearest))
        .route("/points/:mode/reload", post(points::reload))
        .route("/points/:mode/id/:id", get(points::find))
        .route("/session", get(session::find))
        .route("/session/view", get(session::view))
        .route("/session/mode", patch(session::switch_mode))
        .route("/session/criteria", patch(session::update_criteria))
        .route("/session/transport_mode", patch(session::update_transport_mode))
        .route("/session/location", post(session::locate))
        .route("/routes", post(routes::create))
        .route("/routes/nearest", post(routes::to_nearest))
        .route("/routes/points/:id", post(routes::to_point))
        .layer(Extension(api))
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T, addr: SocketAddr) -> Result<(), Error> {
    let app = router(api);

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "server stopped");
            unexpected_error()
        })
}
