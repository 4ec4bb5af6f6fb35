use serde_json::json;

use crate::routes::{json_response, JsonResponse};
use crate::state::{lock, SharedState};

/// `GET /network`: `{}` until the first run has finished, as the panel shows
/// an empty network before any training.
pub fn handle_get(state: &SharedState) -> JsonResponse {
    match lock(state).network_snapshot() {
        Some(snapshot) => json_response(200, &snapshot),
        None => json_response(200, &json!({})),
    }
}
