//! HTTP host for inbound activities.
//!
//! Exposes `POST /api/messages`. Each request runs one turn through the
//! [`Router`] before the response is written. Activities sent with the
//! `expectReplies` delivery mode get their replies in the response body;
//! all others are answered through the channel connector.

use std::future::Future;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::{
    base::{activity::Activity, types::Void},
    router::Router,
    service::reply::{ReplyChannel, buffered::BufferedReplyChannel, connector::ConnectorReplyChannel},
};

/// Path activities are posted to.
pub const MESSAGES_PATH: &str = "/api/messages";

/// Response body for the `expectReplies` delivery mode.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExpectedReplies {
    pub activities: Vec<Activity>,
}

#[derive(Clone)]
struct HostState {
    router: Router,
    connector: ConnectorReplyChannel,
}

/// Builds the HTTP application.
pub fn app(router: Router, connector: ConnectorReplyChannel) -> axum::Router {
    axum::Router::new().route(MESSAGES_PATH, post(handle_activity)).with_state(HostState { router, connector })
}

/// Serves `app` on `listener` until `shutdown` resolves.
pub async fn serve<S>(listener: TcpListener, app: axum::Router, shutdown: S) -> Void
where
    S: Future<Output = ()> + Send + 'static,
{
    info!("Listening for activities on http://{}{}", listener.local_addr()?, MESSAGES_PATH);

    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;

    info!("Host stopped.");

    Ok(())
}

#[instrument(skip_all)]
async fn handle_activity(State(state): State<HostState>, Json(activity): Json<Activity>) -> Response {
    if activity.expects_replies() {
        let buffer = BufferedReplyChannel::new();
        state.router.dispatch(activity, ReplyChannel::buffered(buffer.clone())).await;

        let activities = buffer.take().await;
        return (StatusCode::OK, Json(ExpectedReplies { activities })).into_response();
    }

    state.router.dispatch(activity, ReplyChannel::connector(state.connector)).await;

    StatusCode::ACCEPTED.into_response()
}
