use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use image::{GrayImage, Rgb, RgbImage};
use rr_contour::trace_boundaries;
use rr_core::{Grid, Rect};
use rr_rectify::decompose;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "rr_gallery")]
#[command(about = "Run raster-rect algorithms on external fixtures")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(name = "contours")]
    Contours(CommonArgs),
    #[command(name = "rectangles")]
    Rectangles(CommonArgs),
}

#[derive(Args, Debug, Clone)]
struct CommonArgs {
    #[arg(long, required = true)]
    input: PathBuf,
    #[arg(long, default_value = "docs/fig/raw")]
    out: PathBuf,
    /// Pixels strictly above this value count as foreground.
    #[arg(long, default_value_t = 0)]
    threshold: u8,
}

#[derive(Debug, Clone, Serialize)]
struct ContourDto {
    hole: bool,
    points: Vec<[i32; 2]>,
}

#[derive(Debug, Clone, Serialize)]
struct MetaContours {
    threshold: u8,
    loops: usize,
    holes: usize,
    segments: usize,
    concave_corners: usize,
}

#[derive(Debug, Clone, Serialize)]
struct RectDto {
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
}

#[derive(Debug, Clone, Serialize)]
struct MetaRectangles {
    threshold: u8,
    rectangles: usize,
    covered_area: i64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Command::Contours(args) => run_contours(args),
        Command::Rectangles(args) => run_rectangles(args),
    }
}

fn run_contours(args: CommonArgs) -> Result<()> {
    let case_dir = prepare_case(&args, "contours")?;
    let grid = load_binary_grid(&args.input, args.threshold)?;

    let mut graph = trace_boundaries(&grid.as_view()).context("tracing boundaries")?;
    let segments = graph.segs.len();
    let concave = graph.num_concave();
    let contours = graph.contours();

    let out: Vec<ContourDto> = contours
        .iter()
        .map(|c| ContourDto {
            hole: c.hole,
            points: c.points.iter().map(|p| [p.x, p.y]).collect(),
        })
        .collect();

    write_json(case_dir.join("contours.json"), &out)?;
    write_json(
        case_dir.join("meta.json"),
        &MetaContours {
            threshold: args.threshold,
            loops: contours.len(),
            holes: contours.iter().filter(|c| c.hole).count(),
            segments,
            concave_corners: concave,
        },
    )?;

    Ok(())
}

fn run_rectangles(args: CommonArgs) -> Result<()> {
    let case_dir = prepare_case(&args, "rectangles")?;
    let grid = load_binary_grid(&args.input, args.threshold)?;

    let rects = decompose(&grid.as_view()).context("decomposing raster")?;

    let out: Vec<RectDto> = rects
        .iter()
        .map(|r| RectDto {
            x0: r.x0,
            y0: r.y0,
            x1: r.x1,
            y1: r.y1,
        })
        .collect();

    write_json(case_dir.join("rects.json"), &out)?;
    write_json(
        case_dir.join("meta.json"),
        &MetaRectangles {
            threshold: args.threshold,
            rectangles: rects.len(),
            covered_area: rects.iter().map(Rect::area).sum(),
        },
    )?;

    let overlay = render_rect_overlay(&grid, &rects);
    overlay
        .save(case_dir.join("overlay.png"))
        .context("writing rectangles overlay.png")?;

    Ok(())
}

fn prepare_case(args: &CommonArgs, case_name: &str) -> Result<PathBuf> {
    if !args.input.is_file() {
        bail!("input path is not a file: {}", args.input.display());
    }

    let case_dir = args.out.join(case_name);
    fs::create_dir_all(&case_dir)
        .with_context(|| format!("creating output directory {}", case_dir.display()))?;

    fs::copy(&args.input, case_dir.join("input.png")).with_context(|| {
        format!(
            "copying input {} -> {}",
            args.input.display(),
            case_dir.join("input.png").display()
        )
    })?;

    Ok(case_dir)
}

fn load_binary_grid(path: &Path, threshold: u8) -> Result<Grid> {
    let dyn_img =
        image::open(path).with_context(|| format!("opening input image {}", path.display()))?;
    let luma = dyn_img.to_luma8();
    let (w, h) = luma.dimensions();
    let data: Vec<u8> = luma
        .into_raw()
        .into_iter()
        .map(|v| u8::from(v > threshold))
        .collect();

    Grid::from_vec(w as usize, h as usize, data)
        .with_context(|| format!("constructing raster grid from {}", path.display()))
}

fn render_rect_overlay(grid: &Grid, rects: &[Rect]) -> RgbImage {
    let gray: Vec<u8> = grid.data().iter().map(|&v| if v != 0 { 200 } else { 16 }).collect();
    let luma = GrayImage::from_raw(grid.width() as u32, grid.height() as u32, gray)
        .expect("dimensions and data length must match");
    let mut rgb = image::DynamicImage::ImageLuma8(luma).to_rgb8();

    for rect in rects {
        draw_rect_border(&mut rgb, rect, Rgb([255, 64, 64]));
    }

    rgb
}

/// Draws a one-pixel border just inside the rectangle's cells.
fn draw_rect_border(img: &mut RgbImage, rect: &Rect, color: Rgb<u8>) {
    for x in rect.x0..rect.x1 {
        put_pixel_checked(img, x, rect.y0, color);
        put_pixel_checked(img, x, rect.y1 - 1, color);
    }
    for y in rect.y0..rect.y1 {
        put_pixel_checked(img, rect.x0, y, color);
        put_pixel_checked(img, rect.x1 - 1, y, color);
    }
}

fn put_pixel_checked(img: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>) {
    if x < 0 || y < 0 {
        return;
    }
    let (ux, uy) = (x as u32, y as u32);
    if ux >= img.width() || uy >= img.height() {
        return;
    }
    img.put_pixel(ux, uy, color);
}

fn write_json(path: PathBuf, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(&path, bytes).with_context(|| format!("writing json {}", path.display()))
}
