//! Example: rectangle decomposition of an ASCII-art raster.
//!
//! Reads a text file where `#` or `1` marks a foreground pixel and
//! anything else background, traces its boundary loops, partitions the
//! foreground into rectangles, and prints an annotated render where each
//! cell carries the letter of its covering rectangle.
//!
//! Run from the workspace root:
//!   cargo run -p raster-rect --example ascii_decompose
//!   cargo run -p raster-rect --example ascii_decompose -- --input shape.txt

use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use raster_rect::{Grid, decompose, trace_boundaries};

const DEMO: &str = "\
####.####
####.####
#########
##.....##
#########
####.####
####.####
";

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(about = "Partition an ASCII-art raster into rectangles")]
struct Args {
    /// Path to an ASCII raster (`#`/`1` foreground). Uses a built-in
    /// demo shape when omitted.
    #[arg(long)]
    input: Option<String>,
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();

    let text = match &args.input {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?,
        None => DEMO.to_string(),
    };
    let grid = parse_ascii(&text)?;

    let mut graph = trace_boundaries(&grid.as_view()).context("tracing boundaries")?;
    let contours = graph.contours();
    println!(
        "{}x{} raster: {} loops ({} holes), {} concave corners",
        grid.width(),
        grid.height(),
        contours.len(),
        contours.iter().filter(|c| c.hole).count(),
        graph.num_concave(),
    );

    let t0 = Instant::now();
    let rects = decompose(&grid.as_view()).context("decomposing raster")?;
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;
    println!("{} rectangles ({elapsed_ms:.2} ms):", rects.len());
    for (i, r) in rects.iter().enumerate() {
        println!(
            "  {}: ({}, {}) -> ({}, {})",
            label(i) as char,
            r.x0,
            r.y0,
            r.x1,
            r.y1
        );
    }

    // Annotated render: one letter per covering rectangle.
    let mut render = vec![b'.'; grid.width() * grid.height()];
    for (i, r) in rects.iter().enumerate() {
        for y in r.y0..r.y1 {
            for x in r.x0..r.x1 {
                render[y as usize * grid.width() + x as usize] = label(i);
            }
        }
    }
    println!();
    for row in render.chunks(grid.width()) {
        println!("{}", String::from_utf8_lossy(row));
    }

    Ok(())
}

fn parse_ascii(text: &str) -> Result<Grid> {
    let lines: Vec<&str> = text.lines().filter(|l| !l.is_empty()).collect();
    let height = lines.len();
    let width = lines.first().map_or(0, |l| l.len());

    let mut data = Vec::with_capacity(width * height);
    for line in &lines {
        if line.len() != width {
            bail!("ragged raster: expected {} columns, got {}", width, line.len());
        }
        data.extend(line.bytes().map(|b| u8::from(b == b'#' || b == b'1')));
    }

    Grid::from_vec(width, height, data).context("building raster grid")
}

fn label(i: usize) -> u8 {
    b'A' + (i % 26) as u8
}
