//! Listener lifecycle: bind, serve, and shut down within a grace period.
//!
//! # Design
//! The server runs on its own task with axum's graceful shutdown wired to a
//! `CancellationToken`. Once the shutdown future resolves the token is
//! cancelled, the listener stops accepting, and in-flight requests get
//! `grace` to finish before the task is aborted and the shutdown reported as
//! failed.

use std::{future::Future, net::SocketAddr, time::Duration};

use axum::Router;
use thiserror::Error;
use tokio::{net::TcpListener, task::JoinError};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),

    #[error("server task failed: {0}")]
    Join(#[from] JoinError),

    #[error("in-flight requests did not finish within {0:?}")]
    ShutdownTimeout(Duration),
}

pub async fn bind(addr: SocketAddr) -> Result<TcpListener, LifecycleError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| LifecycleError::Bind { addr, source })
}

/// Serve `app` on `listener` until `shutdown` resolves, then drain.
///
/// Returns early with the server's error if it stops on its own before the
/// shutdown trigger.
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    shutdown: F,
    grace: Duration,
) -> Result<(), LifecycleError>
where
    F: Future<Output = ()> + Send,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "listening");
    }

    let token = CancellationToken::new();
    let drain = token.clone();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { drain.cancelled().await })
            .await
    });

    tokio::select! {
        joined = &mut server => {
            joined??;
            tracing::info!("server stopped");
            return Ok(());
        }
        _ = shutdown => {}
    }

    tracing::info!(grace = ?grace, "shutting down");
    token.cancel();

    match tokio::time::timeout(grace, &mut server).await {
        Ok(joined) => {
            joined??;
            tracing::info!("server stopped");
            Ok(())
        }
        Err(_) => {
            server.abort();
            tracing::error!(
                grace = ?grace,
                "shutdown grace period elapsed, aborting in-flight requests"
            );
            Err(LifecycleError::ShutdownTimeout(grace))
        }
    }
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
