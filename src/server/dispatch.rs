//! JSON-RPC dispatch for transports that run on the multi-threaded runtime.
//!
//! `jsonrpc_v2::Server::handle` returns a future that is not `Send`, so it
//! cannot run inside `tokio::spawn` or an axum handler. The server lives on a
//! dedicated thread with its own current-thread runtime and `LocalSet`; callers
//! hand it raw messages over a channel and await the reply.

use axum::body::Bytes;
use std::io;
use std::sync::mpsc as std_mpsc;
use std::thread;
use tokio::runtime::Builder;
use tokio::sync::{mpsc, oneshot};
use tokio::task::LocalSet;
use tracing::{debug, warn};

use super::io::handle_message;
use super::state::AppState;
use super::transport::build_server;

const WORKER_NAME: &str = "jsonrpc-dispatch";

type Job = (Bytes, oneshot::Sender<Option<String>>);

/// Handle to the dispatch worker. Cheap to clone; the worker stops once every
/// handle is dropped.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    tx: mpsc::UnboundedSender<Job>,
}

impl Dispatcher {
    pub fn spawn(state: AppState) -> io::Result<Self> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Job>();
        let (ready_tx, ready_rx) = std_mpsc::sync_channel::<io::Result<()>>(1);

        thread::Builder::new()
            .name(WORKER_NAME.to_string())
            .spawn(move || {
                let runtime = match Builder::new_current_thread().enable_all().build() {
                    Ok(rt) => rt,
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };
                let _ = ready_tx.send(Ok(()));

                let server = build_server(state);
                let local = LocalSet::new();
                local.block_on(&runtime, async move {
                    while let Some((raw, mut reply)) = rx.recv().await {
                        let server = server.clone();
                        tokio::task::spawn_local(async move {
                            let response = tokio::select! {
                                response = handle_message(&server, &raw) => response,
                                _ = reply.closed() => {
                                    debug!("caller went away, request abandoned");
                                    return;
                                }
                            };
                            let _ = reply.send(response);
                        });
                    }
                });
                debug!("dispatch worker stopped");
            })?;

        ready_rx
            .recv()
            .map_err(|_| io::Error::other("dispatch worker exited during startup"))??;
        Ok(Self { tx })
    }

    /// Handles one raw JSON-RPC message; `None` when there is nothing to send
    /// back. Dropping the returned future abandons the request on the worker.
    pub async fn dispatch(&self, raw: Bytes) -> Option<String> {
        let (reply, response) = oneshot::channel();
        if self.tx.send((raw, reply)).is_err() {
            warn!("dispatch worker is not running");
            return None;
        }
        response.await.ok().flatten()
    }
}
