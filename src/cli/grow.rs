//! Grow command implementation.
//!
//! Expands a plant definition and renders it to PNG. Supports one-shot
//! renders, growth-animation frame sequences, pointer chops between passes,
//! and a watch mode that re-renders whenever the definition file changes.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use clap::{Args, ValueEnum};
use notify::{RecursiveMode, Watcher};

use crate::catalog;
use crate::error::{Result, SproutError};
use crate::output::{plural, Printer};
use crate::parser::load_definitions;
use crate::render::{write_png, Canvas, PixelRenderer, RenderStrategy, TurtleRenderer};
use crate::session::PlantSession;
use crate::types::{PlantDefinition, Season};

/// Rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Style {
    /// Tapered vector branches with leaves and seasons
    #[default]
    Vector,
    /// Chunky 8-bit pixel blocks
    Pixel,
}

/// Grow a plant and render it to a PNG
#[derive(Args, Debug)]
pub struct GrowArgs {
    /// Builtin plant name or definition file
    pub plant: String,

    /// Random seed (any text)
    #[arg(long, default_value = "bytebloom")]
    pub seed: String,

    /// Override the definition's iteration count
    #[arg(long)]
    pub iterations: Option<u32>,

    /// Season applied to leaf drawing
    #[arg(long, value_enum, default_value = "spring")]
    pub season: Season,

    /// Square canvas size in pixels
    #[arg(long, default_value = "1024")]
    pub size: u32,

    /// Integer upscaling factor for the output image
    #[arg(long, default_value = "1")]
    pub scale: u32,

    /// Rendering style
    #[arg(long, value_enum, default_value = "vector")]
    pub style: Style,

    /// Emit a growth animation as this many numbered frames
    #[arg(long)]
    pub frames: Option<u32>,

    /// Prune at a surface point after the first render (repeatable), as X,Y
    #[arg(long = "chop", value_name = "X,Y")]
    pub chops: Vec<String>,

    /// Output directory
    #[arg(long, short, default_value = "dist")]
    pub output: PathBuf,

    /// Re-render whenever the definition file changes
    #[arg(long)]
    pub watch: bool,
}

pub fn run(args: GrowArgs) -> Result<()> {
    let printer = Printer::new();

    let chops = parse_chops(&args.chops)?;
    if args.style == Style::Pixel && !chops.is_empty() {
        return Err(SproutError::Validation {
            message: "--chop requires the vector style".to_string(),
            help: Some("The pixel style has no branch hit-testing surface".to_string()),
        });
    }

    std::fs::create_dir_all(&args.output).map_err(|e| SproutError::Io {
        path: args.output.clone(),
        message: format!("Failed to create output directory: {}", e),
    })?;

    grow_once(&args, &chops, &printer)?;

    if args.watch {
        let path = Path::new(&args.plant);
        if !path.exists() {
            return Err(SproutError::Validation {
                message: "--watch requires a definition file, not a builtin name".to_string(),
                help: None,
            });
        }
        watch(&args, &chops, path, &printer)?;
    }

    Ok(())
}

/// One full expand-render-write pass.
fn grow_once(args: &GrowArgs, chops: &[(f64, f64)], printer: &Printer) -> Result<()> {
    let mut definition = resolve_definition(&args.plant)?;
    if let Some(iterations) = args.iterations {
        definition.iterations = iterations;
    }
    let name = definition.name.clone();

    let mut session = PlantSession::new(definition, &args.seed)?;
    session.set_season(args.season);

    printer.status(
        "Growing",
        &format!(
            "{} ({}, seed \"{}\")",
            name,
            plural(session.definition().iterations as usize, "iteration", "iterations"),
            args.seed
        ),
    );
    printer.info(
        "Sentence",
        &plural(session.sentence().len(), "symbol", "symbols"),
    );

    match args.frames {
        Some(frames) => render_animation(args, &mut session, &name, frames, printer),
        None => render_still(args, &mut session, chops, &name, printer),
    }
}

/// Render the fully grown plant (applying any chops) to one PNG.
fn render_still(
    args: &GrowArgs,
    session: &mut PlantSession,
    chops: &[(f64, f64)],
    name: &str,
    printer: &Printer,
) -> Result<()> {
    let strategy = make_strategy(args, session);

    session.mature();
    let mut canvas = Canvas::new(args.size as usize, args.size as usize);
    session.render(strategy.as_ref(), &mut canvas);

    for &(x, y) in chops {
        match session.chop_at(x, y) {
            Some(index) => {
                printer.status("Chopping", &format!("branch at ({}, {}) [#{}]", x, y, index));
                canvas = Canvas::new(args.size as usize, args.size as usize);
                session.render(strategy.as_ref(), &mut canvas);
            }
            None => {
                printer.warning("Missed", &format!("no branch at ({}, {})", x, y));
            }
        }
    }

    let path = args.output.join(format!("{}.png", name));
    write_png(&canvas, &path, args.scale)?;
    printer.status("Finished", &path.display().to_string());

    Ok(())
}

/// Render a numbered growth-animation sequence.
fn render_animation(
    args: &GrowArgs,
    session: &mut PlantSession,
    name: &str,
    frames: u32,
    printer: &Printer,
) -> Result<()> {
    let frames = frames.max(1);
    let strategy = make_strategy(args, session);
    let step = session.clock().total() / frames as f64;

    // One token for the whole sequence; a chop or reseed mid-run would
    // invalidate the remaining frames.
    let token = session.begin_render();

    for frame in 0..frames {
        let mut canvas = Canvas::new(args.size as usize, args.size as usize);
        if !session.render_frame(token, step, strategy.as_ref(), &mut canvas) {
            printer.warning("Stale", &format!("frame {} superseded, stopping", frame));
            break;
        }

        let path = args.output.join(format!("{}-{:03}.png", name, frame));
        write_png(&canvas, &path, args.scale)?;
    }

    printer.status(
        "Finished",
        &format!("{} -> {}", plural(frames as usize, "frame", "frames"), args.output.display()),
    );

    Ok(())
}

/// Re-render on definition file changes until interrupted.
fn watch(args: &GrowArgs, chops: &[(f64, f64)], path: &Path, printer: &Printer) -> Result<()> {
    let (tx, rx) = mpsc::channel();

    let mut watcher = notify::recommended_watcher(move |event: notify::Result<notify::Event>| {
        if let Ok(event) = event {
            if event.kind.is_modify() || event.kind.is_create() {
                let _ = tx.send(());
            }
        }
    })
    .map_err(|e| SproutError::Render {
        message: format!("Failed to start file watcher: {}", e),
        help: None,
    })?;

    watcher
        .watch(path, RecursiveMode::NonRecursive)
        .map_err(|e| SproutError::Render {
            message: format!("Failed to watch {}: {}", path.display(), e),
            help: None,
        })?;

    printer.info("Watching", &path.display().to_string());

    loop {
        if rx.recv().is_err() {
            return Ok(());
        }
        // Editors fire bursts of events; let them settle.
        while rx.recv_timeout(Duration::from_millis(100)).is_ok() {}

        // A broken edit keeps the previous output; the watcher stays alive.
        if let Err(e) = grow_once(args, chops, printer) {
            printer.error("Invalid", &e.to_string());
        }
    }
}

/// Pick the render strategy, wiring the plant's resolved colours into the
/// pixel palette.
fn make_strategy(args: &GrowArgs, session: &PlantSession) -> Box<dyn RenderStrategy> {
    match args.style {
        Style::Vector => Box::new(TurtleRenderer::new(session.season())),
        Style::Pixel => Box::new(
            PixelRenderer::new()
                .with_plant_colours(session.traits().branch_colour, session.traits().leaf_colour),
        ),
    }
}

/// Resolve a CLI plant argument: a definition file path, or a builtin name.
pub fn resolve_definition(plant: &str) -> Result<PlantDefinition> {
    let path = Path::new(plant);
    if path.exists() {
        let defs = load_definitions(path)?;
        return defs.into_iter().next().ok_or_else(|| SproutError::Parse {
            message: format!("No plant definitions found in {}", path.display()),
            help: None,
        });
    }

    catalog::find(plant).ok_or_else(|| SproutError::Validation {
        message: format!("Unknown plant: {}", plant),
        help: Some(format!(
            "Use a definition file path or one of: {}",
            catalog::names().join(", ")
        )),
    })
}

/// Parse repeated `X,Y` chop points.
fn parse_chops(raw: &[String]) -> Result<Vec<(f64, f64)>> {
    raw.iter()
        .map(|s| {
            s.split_once(',')
                .and_then(|(x, y)| {
                    Some((x.trim().parse::<f64>().ok()?, y.trim().parse::<f64>().ok()?))
                })
                .ok_or_else(|| SproutError::Parse {
                    message: format!("Invalid chop point: {}", s),
                    help: Some("Use --chop X,Y with numeric surface coordinates".to_string()),
                })
        })
        .collect()
}
