//! MCP HTTP+SSE transport.
//!
//! A client opens `GET /sse`, receives an `endpoint` event naming its private
//! `POST /messages/?session_id=..` URL, and gets every JSON-RPC response for
//! that session back as a `message` event on the stream.

use anyhow::{Context, Result};
use axum::Router;
use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use dashmap::DashMap;
use futures_util::Stream;
use serde::Deserialize;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{debug, info};
use uuid::Uuid;

use super::dispatch::Dispatcher;

pub const SSE_PATH: &str = "/sse";
pub const MESSAGES_PATH: &str = "/messages/";

const SESSION_BUFFER: usize = 32;
const KEEP_ALIVE: Duration = Duration::from_secs(15);

type Sessions = Arc<DashMap<String, mpsc::Sender<String>>>;

#[derive(Clone)]
struct SseState {
    dispatcher: Dispatcher,
    sessions: Sessions,
}

#[derive(Debug, Deserialize)]
struct SessionQuery {
    session_id: Option<String>,
}

/// Removes the session entry once its event stream is dropped.
struct SessionGuard {
    id: String,
    sessions: Sessions,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.sessions.remove(&self.id);
        info!(session = %self.id, "sse session closed");
    }
}

pub fn router(dispatcher: Dispatcher) -> Router {
    let state = SseState {
        dispatcher,
        sessions: Arc::new(DashMap::new()),
    };

    Router::new()
        .route(SSE_PATH, get(open_session))
        .route(MESSAGES_PATH, post(post_message))
        .with_state(state)
}

pub async fn serve(addr: &str, dispatcher: Dispatcher) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %listener.local_addr()?, "serving MCP over SSE");
    axum::serve(listener, router(dispatcher)).await?;
    Ok(())
}

async fn open_session(State(state): State<SseState>) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let id = Uuid::new_v4().simple().to_string();
    let (tx, mut rx) = mpsc::channel::<String>(SESSION_BUFFER);
    state.sessions.insert(id.clone(), tx);
    info!(session = %id, "sse session opened");

    let guard = SessionGuard {
        id: id.clone(),
        sessions: state.sessions.clone(),
    };
    let endpoint = format!("{MESSAGES_PATH}?session_id={id}");

    let stream = async_stream::stream! {
        let _guard = guard;
        yield Ok::<Event, Infallible>(Event::default().event("endpoint").data(endpoint));
        while let Some(message) = rx.recv().await {
            yield Ok(Event::default().event("message").data(message));
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::new().interval(KEEP_ALIVE))
}

async fn post_message(
    State(state): State<SseState>,
    Query(query): Query<SessionQuery>,
    body: Bytes,
) -> Response {
    let Some(session_id) = query.session_id.filter(|s| !s.is_empty()) else {
        return (StatusCode::BAD_REQUEST, "session_id is required").into_response();
    };
    if Uuid::try_parse(&session_id).is_err() {
        return (StatusCode::BAD_REQUEST, "Invalid session ID").into_response();
    }
    let Some(tx) = state.sessions.get(&session_id).map(|entry| entry.value().clone()) else {
        return (StatusCode::NOT_FOUND, "Could not find session").into_response();
    };
    if serde_json::from_slice::<serde_json::Value>(&body).is_err() {
        return (StatusCode::BAD_REQUEST, "Could not parse message").into_response();
    }

    let dispatcher = state.dispatcher.clone();
    tokio::spawn(async move {
        tokio::select! {
            response = dispatcher.dispatch(body) => {
                if let Some(response) = response
                    && tx.send(response).await.is_err()
                {
                    debug!(session = %session_id, "session closed before response was delivered");
                }
            }
            _ = tx.closed() => {
                debug!(session = %session_id, "session closed, request abandoned");
            }
        }
    });

    (StatusCode::ACCEPTED, "Accepted").into_response()
}
