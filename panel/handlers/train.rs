use serde_json::json;

use crate::routes::{error_response, json_response, JsonResponse};
use crate::state::{lock, SharedState};

/// `POST /train`: 202 when a run started, 200 when one was already running.
pub fn handle_start(state: &SharedState) -> JsonResponse {
    let session = lock(state);
    match session.start_training() {
        Ok(true) => json_response(202, &json!({ "started": true, "isTraining": true })),
        Ok(false) => json_response(
            200,
            &json!({ "started": false, "isTraining": session.is_training() }),
        ),
        Err(e) => error_response(422, &e.to_string()),
    }
}
