// Server loop module
// Accept loop with signal-driven shutdown

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::handle_connection;
use super::listener::create_listener;
use crate::config::AppState;
use crate::error::ServerError;
use crate::logger;

/// Lifecycle of the accept loop; `Stopped` is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Running,
    Stopped,
}

/// A bound listener plus the state every connection is served with
pub struct Server {
    listener: TcpListener,
    state: Arc<AppState>,
}

impl Server {
    /// Bind the configured address
    ///
    /// Fails with [`ServerError::Bind`] when the address is in use.
    pub fn bind(state: Arc<AppState>) -> Result<Self, ServerError> {
        let addr = state.config.get_socket_addr()?;
        let listener =
            create_listener(addr).map_err(|source| ServerError::Bind { addr, source })?;
        Ok(Self { listener, state })
    }

    /// Address actually bound (resolves port 0)
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections until `shutdown` resolves
    ///
    /// Each connection is served by a local task on the current thread,
    /// so this must run inside a `LocalSet`. Connections still open when
    /// the loop stops are not drained.
    pub async fn run_until<F>(self, shutdown: F) -> Result<ServerState, ServerError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut state = ServerState::Running;

        while state == ServerState::Running {
            tokio::select! {
                biased;

                () = &mut shutdown => {
                    logger::log_shutdown();
                    state = ServerState::Stopped;
                }

                accept_result = self.listener.accept() => {
                    match accept_result {
                        Ok((stream, peer_addr)) => {
                            handle_connection(stream, peer_addr, Arc::clone(&self.state));
                        }
                        Err(e) => {
                            logger::log_error(&format!("Failed to accept connection: {e}"));
                        }
                    }
                }
            }
        }

        Ok(state)
    }
}
