//! # Reflow CLI
//!
//! Usage:
//!   reflow layout.json --width 768 -o out.json
//!   echo '[ ... ]' | reflow --width 1024
//!   reflow --example > layout.json
//!
//! `--debug` prints the resolved breakpoint/ratio snapshot to stderr.
//! Logging is controlled through `RUST_LOG` (e.g. `RUST_LOG=reflow=debug`).

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process;

use tracing_subscriber::EnvFilter;

use reflow::config::ResponsiveConfig;
use reflow::layout::ResponsiveEngine;
use reflow::model::LayoutDocument;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--example") {
        print!("{}", example_layout_json());
        return;
    }

    let viewport_width: f64 = match flag_value(&args, "--width").map(|v| v.parse()) {
        Some(Ok(w)) => w,
        Some(Err(_)) => {
            eprintln!("✗ --width must be a number");
            process::exit(1);
        }
        None => {
            eprintln!("Usage: reflow [layout.json] --width <px> [-o out.json] [--debug]");
            process::exit(1);
        }
    };

    let input = if args.len() > 1 && !args[1].starts_with('-') {
        match fs::read_to_string(&args[1]) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("✗ Failed to read {}: {}", args[1], e);
                process::exit(1);
            }
        }
    } else {
        let mut buf = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut buf) {
            eprintln!("✗ Failed to read stdin: {}", e);
            process::exit(1);
        }
        buf
    };

    let document = match LayoutDocument::from_json(&input) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("✗ {}", e);
            process::exit(1);
        }
    };

    if args.iter().any(|a| a == "--debug") {
        let engine = ResponsiveEngine::with_config(ResponsiveConfig::for_canvas(
            document.editor_canvas_width,
            document.editor_canvas_height,
        ));
        let info = engine.info(viewport_width, document.components.len());
        eprintln!(
            "breakpoint={} ratio={:.1}% canvas={}px available={:.0}px components={}",
            info.breakpoint,
            info.ratio * 100.0,
            info.editor_canvas_width,
            info.available_width,
            info.components_count
        );
    }

    let components = reflow::transform(&document, viewport_width);
    let output = match serde_json::to_string_pretty(&components) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("✗ Failed to serialize output: {}", e);
            process::exit(1);
        }
    };

    match flag_value(&args, "-o") {
        Some(path) => {
            if let Err(e) = fs::write(path, &output) {
                eprintln!("✗ Failed to write {}: {}", path, e);
                process::exit(1);
            }
            eprintln!("✓ Written {} components to {}", components.len(), path);
        }
        None => println!("{}", output),
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a String> {
    args.windows(2).find(|w| w[0] == flag).map(|w| &w[1])
}

fn example_layout_json() -> &'static str {
    r##"{
  "editor_canvas_width": 1920,
  "editor_canvas_height": 1080,
  "components": [
    {
      "id": "comp-1",
      "type": "shape",
      "x": 80, "y": 60, "w": 900, "h": 420, "z": 0,
      "bg_color": "#e8eef7"
    },
    {
      "id": "comp-2",
      "type": "text",
      "x": 140, "y": 120, "w": 640, "h": 280, "z": 1,
      "content": "<h1>Field Notes</h1><p>Stacked on purpose over the shape behind it.</p>"
    },
    {
      "id": "comp-3",
      "type": "image",
      "x": 1080, "y": 80, "w": 640, "h": 400, "z": 0,
      "image_path": "/uploads/ridge.jpg"
    },
    {
      "id": "comp-4",
      "type": "gallery",
      "x": 80, "y": 560, "w": 1120, "h": 420, "z": 0,
      "images": ["/uploads/a.jpg", "/uploads/b.jpg", "/uploads/c.jpg"]
    },
    {
      "id": "comp-5",
      "type": "separator",
      "x": 80, "y": 1020, "w": 1640, "h": 2, "z": 0
    }
  ]
}"##
}
