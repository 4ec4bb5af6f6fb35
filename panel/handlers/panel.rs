use crate::routes::{error_response, json_response, JsonResponse};
use crate::state::{lock, SharedState};

/// `GET /panel`
pub fn handle_get(state: &SharedState) -> JsonResponse {
    match lock(state).view() {
        Ok(view) => json_response(200, &view),
        Err(e) => error_response(500, &e.to_string()),
    }
}
