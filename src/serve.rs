// src/serve.rs

//! Local dev server.
//!
//! Serves the output directory over HTTP and exposes `/__reload`, a
//! server-sent-events endpoint that broadcasts reload notifications to
//! connected clients. The browser-side reload client itself is external;
//! this module only provides the notification channel.

use std::convert::Infallible;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    Router,
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
};
use tokio::sync::broadcast;
use tokio_stream::{Stream, StreamExt, wrappers::BroadcastStream};
use tracing::{debug, info};

use crate::config::ConfigFile;

/// Granularity of a reload notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadKind {
    /// Full page reload.
    Full,
    /// CSS-only injection.
    Css,
    /// JS-only injection.
    Js,
}

impl ReloadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReloadKind::Full => "full",
            ReloadKind::Css => "css",
            ReloadKind::Js => "js",
        }
    }
}

/// Fan-out point for reload notifications.
///
/// The watch side calls [`ReloadHub::notify`]; every connected SSE client
/// holds a subscription. Notifications with no subscribers are dropped,
/// which makes watch-without-serve mode a natural no-op.
#[derive(Debug)]
pub struct ReloadHub {
    tx: broadcast::Sender<ReloadKind>,
}

impl ReloadHub {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self { tx }
    }

    pub fn notify(&self, kind: ReloadKind) {
        match self.tx.send(kind) {
            Ok(receivers) => debug!(kind = kind.as_str(), receivers, "reload notification sent"),
            Err(_) => debug!(kind = kind.as_str(), "no reload subscribers; dropped"),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ReloadKind> {
        self.tx.subscribe()
    }
}

impl Default for ReloadHub {
    fn default() -> Self {
        Self::new()
    }
}

/// Serve the output directory until the task is cancelled or the listener
/// fails.
pub async fn serve(cfg: Arc<ConfigFile>, root: PathBuf, hub: Arc<ReloadHub>) -> Result<()> {
    let public_root = root.join(&cfg.paths.public.root);
    let addr = format!("{}:{}", cfg.serve.host, cfg.serve.port);

    let app = Router::new()
        .route("/__reload", get(reload_events))
        .fallback_service(tower_http::services::ServeDir::new(&public_root))
        .with_state(hub);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding dev server to {addr}"))?;

    info!(%addr, root = ?public_root, "dev server listening");

    axum::serve(listener, app)
        .await
        .context("dev server terminated")?;

    Ok(())
}

async fn reload_events(
    State(hub): State<Arc<ReloadHub>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = hub.subscribe();
    let stream = BroadcastStream::new(rx)
        .filter_map(|kind| kind.ok())
        .map(|kind| Ok::<_, Infallible>(Event::default().event("reload").data(kind.as_str())));

    Sse::new(stream).keep_alive(KeepAlive::default())
}
