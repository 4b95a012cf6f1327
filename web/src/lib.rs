use clap::Parser;
use wasm_bindgen::prelude::*;

mod board;
mod clipboard;
mod url_store;
mod utils;

#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(flatten)]
    board: board::BoardProps,
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let (args, args_error) = match Args::try_parse_from(location_hash.split(['#', '&'])) {
        Ok(args) => (args, None),
        Err(err) => (Args::default(), Some(err)),
    };
    if let Some(log_level) = args.verbose.log_level() {
        // only fails when a logger is already installed
        let _ = console_log::init_with_level(log_level);
    }
    if let Some(err) = args_error {
        log::warn!("ignoring url hash arguments: {}", err);
    }
    log::debug!("seed: {:?}", args.board.seed);

    let Some(root) = document().get_element_by_id("board") else {
        log::error!("Could not find id=\"board\" element");
        return;
    };

    log::debug!("App started");
    yew::Renderer::<board::BoardView>::with_root_and_props(root, args.board).render();
}
