//! HTTP transport over the query engine.
//!
//! Thin read-only JSON API. Every route delegates to [`QueryEngine`] and the
//! engine's snapshot never changes, so request handling needs no locking;
//! the engine is shared across connections behind an `Arc`.
//!
//! Routes (GET only):
//! - `/api/vqa_data?page&limit&category&episode` returns one listing page.
//! - `/api/episodes` returns the sorted episode names.
//! - `/api/categories` returns category names and counts.
//! - `/api/statistics` returns dataset-wide statistics.
//! - `/api/vqa/<index>` returns a single item by load-order position.
//! - `/api/vqa/id/<unique_id>` returns a single item by unique id.
//! - `/api/images/<image_id>` returns the image bytes.

use std::convert::Infallible;
use std::io;
use std::net::{SocketAddr, TcpListener};
use std::path::Path;
use std::sync::Arc;

use hyper::service::{make_service_fn, service_fn};
use hyper::{header, Body, Method, Request, Response, Server, StatusCode};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use crate::constants::images::IMAGE_EXTENSION;
use crate::constants::server::{BINARY_CONTENT_TYPE, JSON_CONTENT_TYPE, PNG_CONTENT_TYPE};
use crate::errors::DatasetError;
use crate::query::{ListParams, QueryEngine};

/// Bind `addr` and serve the API until the server fails.
pub async fn serve(engine: QueryEngine, addr: SocketAddr) -> Result<(), DatasetError> {
    let listener = TcpListener::bind(addr)?;
    serve_on(engine, listener).await
}

/// Serve the API on an already-bound listener.
///
/// Useful when the caller needs the actual bound address, e.g. after binding
/// port 0.
pub async fn serve_on(engine: QueryEngine, listener: TcpListener) -> Result<(), DatasetError> {
    listener.set_nonblocking(true)?;
    let engine = Arc::new(engine);
    let make_svc = make_service_fn(move |_conn| {
        let engine = Arc::clone(&engine);
        async move {
            Ok::<_, Infallible>(service_fn(move |req| {
                let engine = Arc::clone(&engine);
                async move { Ok::<_, Infallible>(handle_request(&engine, req).await) }
            }))
        }
    });

    let server = Server::from_tcp(listener)
        .map_err(io::Error::other)?
        .serve(make_svc);
    info!(addr = %server.local_addr(), "dataset API listening");
    server.await.map_err(io::Error::other)?;
    Ok(())
}

async fn handle_request(engine: &QueryEngine, req: Request<Body>) -> Response<Body> {
    if req.method() != Method::GET {
        return status_response(StatusCode::NOT_FOUND, "not found");
    }
    let path = req.uri().path();
    if path == "/api/vqa_data" {
        json_response(&engine.list(&parse_list_params(req.uri().query())))
    } else if path == "/api/episodes" {
        json_response(&json!({ "episodes": engine.episodes() }))
    } else if path == "/api/categories" {
        json_response(&engine.categories())
    } else if path == "/api/statistics" {
        json_response(&engine.statistics())
    } else if let Some(unique_id) = path.strip_prefix("/api/vqa/id/") {
        match engine.by_unique_id(&decode_segment(unique_id)) {
            Ok(item) => json_response(item),
            Err(err) => error_response(&err),
        }
    } else if let Some(index) = path.strip_prefix("/api/vqa/") {
        match index.parse::<usize>() {
            Ok(index) => match engine.by_index(index) {
                Ok(item) => json_response(item),
                Err(err) => error_response(&err),
            },
            Err(_) => status_response(StatusCode::NOT_FOUND, "not found"),
        }
    } else if let Some(image_id) = path.strip_prefix("/api/images/") {
        image_response(engine, &decode_segment(image_id)).await
    } else {
        status_response(StatusCode::NOT_FOUND, "not found")
    }
}

async fn image_response(engine: &QueryEngine, image_id: &str) -> Response<Body> {
    let resolved = match engine.resolve_image(image_id) {
        Ok(resolved) => resolved,
        Err(err) => return error_response(&err),
    };
    match tokio::fs::read(resolved.path()).await {
        Ok(bytes) => {
            let is_png = Path::new(&resolved.file_name)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(IMAGE_EXTENSION));
            let content_type = if is_png {
                PNG_CONTENT_TYPE
            } else {
                BINARY_CONTENT_TYPE
            };
            Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, content_type)
                .body(Body::from(bytes))
                .unwrap_or_else(|_| Response::new(Body::empty()))
        }
        Err(err) => {
            // Resolution raced a file removal; report it like any other miss.
            warn!(image_id = %image_id, error = %err, "resolved image unreadable");
            error_response(&DatasetError::ImageFileMissing(
                image_id.to_string(),
                resolved.dir.clone(),
            ))
        }
    }
}

/// Parse listing parameters from a raw query string.
///
/// Unparsable `page`/`limit` values fall back to their defaults and empty
/// filter values mean no filter, so a malformed query never fails a request.
fn parse_list_params(query: Option<&str>) -> ListParams {
    let mut params = ListParams::default();
    let Some(query) = query else {
        return params;
    };
    for pair in query.split('&') {
        let (key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
        let value = decode_query_value(raw_value);
        match key {
            "page" => {
                if let Ok(page) = value.parse() {
                    params.page = page;
                }
            }
            "limit" => {
                if let Ok(limit) = value.parse() {
                    params.limit = limit;
                }
            }
            "category" if !value.is_empty() => params.category = Some(value),
            "episode" if !value.is_empty() => params.episode = Some(value),
            _ => {}
        }
    }
    params
}

/// Decode a form-encoded query value: '+' means space, then percent escapes.
fn decode_query_value(raw: &str) -> String {
    let plus_decoded = raw.replace('+', " ");
    match urlencoding::decode(&plus_decoded) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => plus_decoded,
    }
}

/// Decode a percent-encoded path segment.
fn decode_segment(segment: &str) -> String {
    match urlencoding::decode(segment) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => segment.to_string(),
    }
}

fn json_response<T: Serialize>(value: &T) -> Response<Body> {
    match serde_json::to_vec(value) {
        Ok(encoded) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(Body::from(encoded))
            .unwrap_or_else(|_| Response::new(Body::empty())),
        Err(err) => {
            warn!(error = %err, "response serialization failed");
            status_response(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        }
    }
}

fn error_response(err: &DatasetError) -> Response<Body> {
    let status = match err {
        DatasetError::InvalidImageId(_) => StatusCode::BAD_REQUEST,
        DatasetError::IndexOutOfRange { .. }
        | DatasetError::UnknownUniqueId(_)
        | DatasetError::UnknownImageId(_)
        | DatasetError::ImageFileMissing(_, _) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    status_response(status, &err.to_string())
}

fn status_response(status: StatusCode, message: &str) -> Response<Body> {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, JSON_CONTENT_TYPE)
        .body(Body::from(json!({ "error": message }).to_string()))
        .unwrap_or_else(|_| Response::new(Body::empty()))
}
