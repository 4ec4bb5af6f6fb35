use glyph_panel::{GlyphError, SessionError};

use crate::routes::{error_response, json_response, JsonResponse};
use crate::state::{lock, SharedState};

/// `POST /tiles/{id}/toggle`: responds with the refreshed panel.
pub fn handle_toggle(state: &SharedState, id: &str) -> JsonResponse {
    let Ok(id) = id.parse::<u32>() else {
        return error_response(400, &format!("invalid tile id `{id}`"));
    };

    let mut session = lock(state);
    match session.toggle_tile(id).and_then(|_| session.view()) {
        Ok(view) => json_response(200, &view),
        Err(SessionError::Glyph(GlyphError::UnknownTile(id))) => {
            error_response(404, &format!("no tile with id {id}"))
        }
        Err(e) => error_response(500, &e.to_string()),
    }
}
