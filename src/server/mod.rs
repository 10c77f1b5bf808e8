mod dispatch;
mod error;
mod io;
mod rpc;
mod setup;
mod sse;
mod state;
mod transport;

pub use dispatch::Dispatcher;
pub use error::ToRpcError;
pub use io::{handle_message, run_with_io};
pub use rpc::{PROTOCOL_VERSION, SERVER_NAME, SUPPORTED_PROTOCOL_VERSIONS, negotiate_version};
pub use setup::{build_state, build_state_with_provider};
pub use sse::{MESSAGES_PATH, SSE_PATH, router as sse_router, serve as serve_sse};
pub use state::{AppState, CallParams, NO_ARGUMENTS};
pub use transport::{build_server, run, run_with_server};
