/// glyph-panel
///
/// JSON front for the glyph classifier. Any view (a page with a tile grid,
/// a script, curl) drives the session through these routes:
///
///   GET  /panel               tiles, encoding, scores, training state
///   POST /tiles/{id}/toggle   flip one tile, returns the refreshed panel
///   POST /train               start a training run (dropped if one is running)
///   GET  /network             parameters captured after the latest run
///
/// Run with:
///   cargo run --release -- [config.toml]

mod logging;
mod routes;
mod state;
mod handlers;

use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use tiny_http::Server;
use tracing::{error, info};

use glyph_panel::{PanelConfig, Session};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn main() -> ExitCode {
    logging::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), BoxError> {
    let config = match std::env::args().nth(1) {
        Some(path) => PanelConfig::load_from_file(&path)?,
        None => PanelConfig::default(),
    };

    let session = Session::new(&config)?;
    info!("{}", session.glyph().render_ascii());

    let server = Server::http(config.server.addr.as_str())?;
    info!("listening on http://{}", config.server.addr);

    let shared_state = Arc::new(Mutex::new(session));

    // One thread per request: a long training run never blocks tile edits.
    for request in server.incoming_requests() {
        let state_clone = shared_state.clone();
        std::thread::spawn(move || {
            routes::dispatch(request, state_clone);
        });
    }
    Ok(())
}
