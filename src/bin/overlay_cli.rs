//! CLI tool for grid-overlay - replays a JSON scene headlessly and outputs the
//! emitted notifications and frame reports as JSON
//!
//! Usage:
//!   overlay_cli <scene.json>                # Output JSON to stdout
//!   overlay_cli <scene.json> -o events.json # Output JSON to file
//!
//! Set `RUST_LOG=grid_overlay=debug` to trace gestures on stderr.

#![allow(clippy::exit)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use grid_overlay::scene::{replay, Scene};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: overlay_cli <scene.json> [-o events.json]");
        std::process::exit(1);
    }

    let input_path = &args[1];
    let output_path = if args.len() > 3 && args[2] == "-o" {
        Some(&args[3])
    } else {
        None
    };

    // Read scene
    let text = match fs::read_to_string(input_path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Error reading {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    let scene = match Scene::from_json(&text) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error parsing scene: {}", e);
            std::process::exit(1);
        }
    };

    let output = replay(&scene);

    let json = match serde_json::to_string_pretty(&output) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                eprintln!("Error writing {}: {}", path, e);
                std::process::exit(1);
            }
            eprintln!("Written: {}", path);
        }
        None => {
            let mut stdout = io::stdout();
            if stdout
                .write_all(json.as_bytes())
                .and_then(|()| stdout.write_all(b"\n"))
                .is_err()
            {
                std::process::exit(1);
            }
        }
    }
}
