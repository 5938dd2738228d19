use std::path::{Path, PathBuf};

use clap::Parser;
use cutting_plan::config::{DEFAULT_KERF, DEFAULT_MIN_REMNANT};
use cutting_plan::render;
use cutting_plan::types::{CuttingPlan, PlanWarning, Rect};
use cutting_plan::{FurnitureModule, GeometryPolicy, PlanConfig, build_plan};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "cutting_plan",
    about = "Cut list and sheet nesting for furniture modules"
)]
struct Cli {
    /// JSON file holding the project's module list
    modules: PathBuf,

    /// Stock sheet dimensions (WxH, e.g. 2750x1850)
    #[arg(long, default_value = "2750x1850", value_parser = parse_dimensions)]
    sheet: Rect,

    /// Blade kerf width in mm
    #[arg(long, default_value_t = DEFAULT_KERF)]
    kerf: u32,

    /// Offcuts not larger than this (mm) in either direction are scrap
    #[arg(long, default_value_t = DEFAULT_MIN_REMNANT)]
    min_remnant: u32,

    /// Price of one stock sheet
    #[arg(long, default_value_t = 0.0)]
    sheet_price: f64,

    /// Drop pieces a module is too small for instead of failing
    #[arg(long)]
    skip_invalid: bool,

    /// Expected material; repeat for more. Others are reported as unknown
    #[arg(long = "material")]
    materials: Vec<String>,

    /// Show ASCII layout of each sheet
    #[arg(long)]
    layout: bool,

    /// Print the whole plan as JSON
    #[arg(long)]
    json: bool,
}

fn parse_dimensions(s: &str) -> Result<Rect, String> {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() != 2 {
        return Err(format!("invalid dimensions '{}', expected WxH", s));
    }
    let width = parts[0]
        .parse::<u32>()
        .map_err(|_| format!("invalid width in '{}'", s))?;
    let height = parts[1]
        .parse::<u32>()
        .map_err(|_| format!("invalid height in '{}'", s))?;
    if width == 0 || height == 0 {
        return Err(format!("dimensions must be non-zero in '{}'", s));
    }
    Ok(Rect::new(width, height))
}

fn load_modules(path: &Path) -> Result<Vec<FurnitureModule>, String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    serde_json::from_str(&raw).map_err(|e| format!("invalid module list {}: {}", path.display(), e))
}

fn print_plan(plan: &CuttingPlan, layout: bool) {
    println!("Cut list:");
    for p in &plan.pieces {
        let edges = if p.edge_banding.is_empty() {
            "-"
        } else {
            p.edge_banding.as_str()
        };
        println!(
            "  {:<12} {:<6} {:>4}x{:<4} x{} {} [{}]",
            p.module_id, p.part, p.width, p.height, p.quantity, p.material, edges
        );
    }
    println!();

    for sheet in &plan.sheets {
        println!(
            "Sheet {} ({}, {}x{}, {:.1}% waste):",
            sheet.id, sheet.material, sheet.width, sheet.height, sheet.waste_percentage
        );
        for p in &sheet.placements {
            let rot = if p.rotated { " [rotated]" } else { "" };
            println!(
                "  {} {} {} @ ({}, {}){}",
                p.piece.module_id,
                p.piece.part,
                p.footprint(),
                p.x,
                p.y,
                rot
            );
        }
        if layout {
            print!("{}", render::render_sheet(sheet));
        }
        println!();
    }

    for w in &plan.warnings {
        match w {
            PlanWarning::UnknownMaterial { material } => {
                println!("Warning: unknown material '{}'", material)
            }
            PlanWarning::SkippedPiece {
                module_id,
                part,
                width,
                height,
                ..
            } => println!(
                "Warning: skipped {} of {} ({}x{})",
                part, module_id, width, height
            ),
        }
    }

    let stats = &plan.stats;
    println!(
        "Summary: {} piece{}, {} sheet{} used, {:.1}% average waste, {:.2}/{:.2} m² used, cost {:.2}",
        stats.total_pieces,
        if stats.total_pieces == 1 { "" } else { "s" },
        stats.total_sheets,
        if stats.total_sheets == 1 { "" } else { "s" },
        stats.avg_waste,
        stats.used_area,
        stats.total_sheet_area,
        stats.sheet_cost,
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let modules = load_modules(&cli.modules).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let config = PlanConfig::new()
        .with_sheet(cli.sheet.w, cli.sheet.h)
        .with_kerf(cli.kerf)
        .with_min_remnant(cli.min_remnant)
        .with_sheet_price(cli.sheet_price)
        .with_geometry_policy(if cli.skip_invalid {
            GeometryPolicy::Skip
        } else {
            GeometryPolicy::Abort
        })
        .with_known_materials(cli.materials);

    let plan = build_plan(&modules, &config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    if cli.json {
        match serde_json::to_string_pretty(&plan) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print_plan(&plan, cli.layout);
    }
}
