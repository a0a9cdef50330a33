//! `svgplay` CLI — flatten SVG path documents into polyline-only SVG.

use std::fs;
use std::process;

use clap::Parser;

use svgplay_core::document::{DocumentLoader, DocumentOptions};
use svgplay_core::player::{play_path, PlayOptions};
use svgplay_core::resolver::parse_path;
use svgplay_graphics::scene::{Element, Scene};
use svgplay_graphics::trace::Trace;
use svgplay_graphics::types::{Affine, Color, Dash, Stroke, Style, DEFAULT_CURVE_SEGMENTS};
use svgplay_svg::{render_with_options, RenderOptions};

#[derive(Parser)]
#[command(version, about = "Flatten SVG curves and dashes into polyline paths")]
struct Cli {
    /// Input SVG file to flatten
    file: Option<String>,

    /// Play a raw path data string instead of reading a file
    #[arg(short = 'p', long = "path", value_name = "DATA", conflicts_with = "file")]
    path: Option<String>,

    /// Output file; prints to stdout when omitted
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Flatten every curve into this many segments
    #[arg(long, value_name = "N")]
    segments: Option<usize>,

    /// Disable hole detection for multi-sub-path fills
    #[arg(long)]
    no_holes: bool,

    /// Decimal places for output coordinates
    #[arg(long, value_name = "N", default_value_t = 4)]
    precision: usize,

    /// Dash length applied to raw path data
    #[arg(long, value_name = "LEN", requires = "path")]
    dash: Option<f64>,

    /// Gap length between dashes; defaults to the dash length
    #[arg(long, value_name = "LEN", requires = "dash")]
    gap: Option<f64>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let scene = build_scene(&cli);

    let opts = RenderOptions {
        precision: cli.precision,
        ..RenderOptions::default()
    };
    let svg_str = render_with_options(&scene, &opts).to_string();

    match cli.output {
        Some(ref path) => write_svg(path, &svg_str),
        None => println!("{svg_str}"),
    }
}

fn build_scene(cli: &Cli) -> Scene {
    if let Some(ref data) = cli.path {
        return scene_from_path_data(data, cli);
    }
    if let Some(ref file) = cli.file {
        let source = match fs::read_to_string(file) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error reading {file}: {e}");
                process::exit(1);
            }
        };
        return scene_from_document(&source, cli);
    }
    eprintln!("No input file or path data specified");
    process::exit(1);
}

fn scene_from_document(source: &str, cli: &Cli) -> Scene {
    let options = DocumentOptions {
        holes: !cli.no_holes,
        curve_segments: cli.segments,
    };
    let mut loader = DocumentLoader::new(options);
    let scene = match loader.load(source) {
        Ok(scene) => scene,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    // Per-element failures are recoverable; report them and keep going.
    for error in loader.errors() {
        eprintln!("Warning: {error}");
    }

    scene
}

fn scene_from_path_data(data: &str, cli: &Cli) -> Scene {
    let path = match parse_path(data) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let mut style = Style {
        curve_segments: cli.segments.unwrap_or(DEFAULT_CURVE_SEGMENTS),
        ..Style::default()
    };
    if let Some(dash) = cli.dash {
        // A dashed outline has no meaningful interior to fill.
        style.fill = None;
        style.stroke = Some(Stroke {
            color: Color::BLACK,
            width: 1.0,
            dash: Some(Dash::new(dash, cli.gap.unwrap_or(dash))),
        });
    }

    let mut trace = Trace::new();
    let play = PlayOptions {
        holes: !cli.no_holes,
    };
    play_path(&path, &style, play, &mut trace);

    let mut scene = Scene::new();
    if !trace.is_empty() {
        scene.push(Element {
            trace,
            style,
            transform: Affine::IDENTITY,
        });
    }
    scene
}

fn write_svg(path: &str, content: &str) {
    match fs::write(path, content) {
        Ok(()) => {
            eprintln!("Wrote {path}");
        }
        Err(e) => {
            eprintln!("Error writing {path}: {e}");
            process::exit(1);
        }
    }
}
