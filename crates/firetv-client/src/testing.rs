//! Test utilities for firetv-client
//!
//! Provides an in-process HTTP server for running client, pairing and
//! device tests against the simulator over real sockets.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;

use crate::error::Result;

/// A test server that automatically shuts down when dropped
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl TestServer {
    /// Serve an axum Router on an ephemeral localhost port.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use std::sync::Arc;
    /// use firetv_client::{testing::TestServer, FireTvClient};
    /// use firetv_sim::{create_router, FireTvSimulator};
    ///
    /// let sim = Arc::new(FireTvSimulator::with_fixed_pin("1234"));
    /// let server = TestServer::start(create_router(sim.clone())).await?;
    /// let client = FireTvClient::new(&server.host(), server.port())?;
    /// ```
    pub async fn start(router: axum::Router) -> Result<Self> {
        // Bind to any available port
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        // Spawn the server
        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        // Give the server a moment to start
        tokio::time::sleep(Duration::from_millis(10)).await;

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Host the server is listening on
    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    /// Port the server is listening on
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Base URL of the test server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Shut the server down gracefully
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        // Send shutdown signal if not already done
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        // Abort the task if still running
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
