//! Devtools Query Server
//!
//! Two read-only JSON endpoints consumed by the inspector panel:
//! the merged component catalog and raw example source retrieval.

use crate::introspection::IntrospectionSource;
use anyhow::Result;
use bytes::Bytes;
use http_body_util::Full;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{header, Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde_json::json;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info};
use ui_devtools_meta::{merge_catalog, MetaStore};

pub const CATALOG_ROUTE: &str = "/__ui_devtools__/api/component-meta";
pub const EXAMPLE_ROUTE: &str = "/__ui_devtools__/api/component-example";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// Directory holding `<Component>.vue` example sources.
    pub examples_dir: PathBuf,
    /// Component-name prefix reserved for the library's own components.
    pub prefix: String,
}

/// Everything a request handler needs, shared across connections.
pub struct ServerContext {
    pub config: ServerConfig,
    pub store: MetaStore,
    pub introspection: Box<dyn IntrospectionSource>,
}

/// The devtools HTTP query server.
pub struct DevtoolsServer {
    context: Arc<ServerContext>,
}

impl DevtoolsServer {
    pub fn new(
        config: ServerConfig,
        store: MetaStore,
        introspection: Box<dyn IntrospectionSource>,
    ) -> Self {
        Self {
            context: Arc::new(ServerContext {
                config,
                store,
                introspection,
            }),
        }
    }

    /// Run the accept loop. Each connection is served on its own task;
    /// request failures are request-scoped and never take the process down.
    pub async fn start(&self) -> Result<()> {
        let listener = TcpListener::bind(self.context.config.addr).await?;
        info!(
            "devtools server listening on {}",
            listener.local_addr()?
        );

        loop {
            match listener.accept().await {
                Ok((stream, peer)) => {
                    debug!("devtools connection from {}", peer);
                    let context = self.context.clone();
                    tokio::spawn(async move {
                        let service = service_fn(move |req| {
                            let context = context.clone();
                            async move { Ok::<_, Infallible>(handle(&context, req).await) }
                        });
                        if let Err(e) = http1::Builder::new()
                            .serve_connection(TokioIo::new(stream), service)
                            .await
                        {
                            debug!("devtools connection from {} ended: {}", peer, e);
                        }
                    });
                }
                Err(e) => {
                    error!("failed to accept devtools connection: {}", e);
                }
            }
        }
    }
}

/// Route one request. Generic over the body type; only the request line is
/// inspected.
pub async fn handle<B>(context: &ServerContext, req: Request<B>) -> Response<Full<Bytes>> {
    if req.method() != Method::GET {
        return json_error(StatusCode::NOT_FOUND, "Not found");
    }

    match req.uri().path() {
        CATALOG_ROUTE => catalog_response(context),
        EXAMPLE_ROUTE => example_response(context, req.uri().query()).await,
        _ => json_error(StatusCode::NOT_FOUND, "Not found"),
    }
}

/// Catalog endpoint: re-load the introspection catalog, merge it with the
/// current store contents, and serialize the result. No caching across
/// requests.
fn catalog_response(context: &ServerContext) -> Response<Full<Bytes>> {
    let introspected = match context.introspection.load() {
        Ok(value) => value,
        Err(e) => {
            error!("failed to load introspection catalog: {:#}", e);
            return json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to load component meta",
            );
        }
    };

    let overrides = context.store.snapshot();
    let catalog = merge_catalog(&introspected, &overrides, &context.config.prefix);
    json_response(StatusCode::OK, serde_json::Value::Object(catalog).to_string())
}

/// Example-source endpoint: `?component=<Name>` resolves to
/// `<examples_dir>/<Name>.vue`.
async fn example_response(
    context: &ServerContext,
    query: Option<&str>,
) -> Response<Full<Bytes>> {
    let component = query_param(query, "component");
    let Some(component) = component.filter(|name| !name.is_empty()) else {
        return json_error(StatusCode::BAD_REQUEST, "Component name is required");
    };

    // The name is interpolated into a path; keep it a bare identifier.
    if !component
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return json_error(StatusCode::BAD_REQUEST, "Invalid component name");
    }

    let path = context.config.examples_dir.join(format!("{component}.vue"));
    match tokio::fs::read_to_string(&path).await {
        Ok(source) => json_response(
            StatusCode::OK,
            json!({ "component": component, "source": source }).to_string(),
        ),
        Err(e) => {
            error!(
                "failed to read component source for {}: {} ({})",
                component,
                e,
                path.display()
            );
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to read component source",
            )
        }
    }
}

/// Pull one parameter out of a query string. The known parameters are bare
/// identifiers, so no percent-decoding is needed.
fn query_param(query: Option<&str>, name: &str) -> Option<String> {
    query?
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

fn json_response(status: StatusCode, body: String) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::new())))
}

fn json_error(status: StatusCode, message: &str) -> Response<Full<Bytes>> {
    json_response(status, json!({ "error": message }).to_string())
}
