use std::io::Cursor;

use serde::Serialize;
use tiny_http::{Header, Method, Request, Response, StatusCode};
use tracing::{debug, warn};

use crate::handlers;
use crate::state::SharedState;

pub type JsonResponse = Response<Cursor<Vec<u8>>>;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

pub fn json_response<T: Serialize>(status: u16, body: &T) -> JsonResponse {
    match serde_json::to_string_pretty(body) {
        Ok(json) => {
            with_json_header(Response::from_string(json).with_status_code(StatusCode(status)))
        }
        Err(e) => error_response(500, &format!("failed to serialize response: {e}")),
    }
}

pub fn error_response(status: u16, message: &str) -> JsonResponse {
    let body = serde_json::json!({ "error": message }).to_string();
    with_json_header(Response::from_string(body).with_status_code(StatusCode(status)))
}

pub fn not_found() -> JsonResponse {
    error_response(404, "not found")
}

fn with_json_header(response: JsonResponse) -> JsonResponse {
    match Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

pub fn dispatch(request: Request, state: SharedState) {
    let method = request.method().clone();
    let url = request.url().to_owned();
    let path = url.split('?').next().unwrap_or_default();
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    debug!(%method, path, "request");

    let response = match (&method, segments.as_slice()) {
        (Method::Get, [""] | ["panel"]) => handlers::panel::handle_get(&state),
        (Method::Post, ["tiles", id, "toggle"]) => handlers::tiles::handle_toggle(&state, id),
        (Method::Post, ["train"]) => handlers::train::handle_start(&state),
        (Method::Get, ["network"]) => handlers::network::handle_get(&state),
        _ => not_found(),
    };

    if let Err(e) = request.respond(response) {
        warn!("failed to send response: {e}");
    }
}
