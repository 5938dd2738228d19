//! Parametric derivation of the boards that make up a furniture module.

use tracing::{debug, warn};

use crate::config::GeometryPolicy;
use crate::error::{PlanError, Result};
use crate::types::{CutPiece, FurnitureModule, GrainDirection, PartLabel, PlanWarning};

pub const BOARD_THICKNESS: i64 = 18;
pub const BACK_PANEL_MATERIAL: &str = "Eucatex 3mm";

const BACK_CLEARANCE: i64 = 6;
const SHELF_CLEARANCE: i64 = 20;
const DOOR_GAP: i64 = 4;
const SHELF_SPACING: i64 = 400;

const EDGE_SIDE: &str = "F-F-V-V";
const EDGE_PANEL: &str = "F-V-V-V";
const EDGE_DOOR: &str = "F-F-F-F";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub pieces: Vec<CutPiece>,
    pub warnings: Vec<PlanWarning>,
}

struct PartRule {
    part: PartLabel,
    width: i64,
    height: i64,
    quantity: u32,
    material: Option<&'static str>,
    edge_banding: &'static str,
    grain: GrainDirection,
}

/// Door count implied by the free-text module type ("... 1P", "... 2P").
pub fn legacy_door_count(module_type: &str) -> u32 {
    let t = module_type.to_lowercase();
    if t.contains("1p") {
        1
    } else if t.contains("2p") {
        2
    } else {
        0
    }
}

/// Shelves that physically stack between top and bottom, one board thickness each.
pub fn max_shelves(height: i32) -> u32 {
    ((height as i64 - 2 * BOARD_THICKNESS) / BOARD_THICKNESS).clamp(0, u32::MAX as i64) as u32
}

fn shelf_count(module: &FurnitureModule) -> Result<u32> {
    match module.shelf_count {
        Some(n) if n > max_shelves(module.height) => Err(PlanError::InvalidPartCount {
            module_id: module.id.clone(),
            module_name: module.name.clone(),
            part: PartLabel::Shelf,
            count: n,
            max: max_shelves(module.height),
        }),
        Some(n) => Ok(n),
        None => Ok((module.height as i64 / SHELF_SPACING - 1).max(1) as u32),
    }
}

fn door_count(module: &FurnitureModule) -> u32 {
    module
        .door_count
        .unwrap_or_else(|| legacy_door_count(&module.module_type))
}

fn part_rules(module: &FurnitureModule, shelves: u32, doors: u32) -> Vec<PartRule> {
    let w = module.width as i64;
    let h = module.height as i64;
    let d = module.depth as i64;
    let t = BOARD_THICKNESS;

    let mut rules = vec![
        PartRule {
            part: PartLabel::Side,
            width: d - t,
            height: h,
            quantity: 2,
            material: None,
            edge_banding: EDGE_SIDE,
            grain: GrainDirection::Vertical,
        },
        PartRule {
            part: PartLabel::Top,
            width: w,
            height: d - t,
            quantity: 1,
            material: None,
            edge_banding: EDGE_PANEL,
            grain: GrainDirection::Horizontal,
        },
        PartRule {
            part: PartLabel::Bottom,
            width: w - 2 * t,
            height: d - t,
            quantity: 1,
            material: None,
            edge_banding: EDGE_PANEL,
            grain: GrainDirection::Horizontal,
        },
        PartRule {
            part: PartLabel::Back,
            width: w - BACK_CLEARANCE,
            height: h - BACK_CLEARANCE,
            quantity: 1,
            material: Some(BACK_PANEL_MATERIAL),
            edge_banding: "",
            grain: GrainDirection::None,
        },
    ];

    if shelves > 0 {
        rules.push(PartRule {
            part: PartLabel::Shelf,
            width: w - 2 * t - SHELF_CLEARANCE,
            height: d - t - SHELF_CLEARANCE,
            quantity: shelves,
            material: None,
            edge_banding: EDGE_PANEL,
            grain: GrainDirection::Horizontal,
        });
    }

    if doors > 0 {
        rules.push(PartRule {
            part: PartLabel::Door,
            width: w / doors as i64 - DOOR_GAP,
            height: h - DOOR_GAP,
            quantity: doors,
            material: None,
            edge_banding: EDGE_DOOR,
            grain: GrainDirection::Vertical,
        });
    }

    rules
}

/// Derives the pieces of one module. Appliances yield nothing.
pub fn extract_module(module: &FurnitureModule, policy: GeometryPolicy) -> Result<Extraction> {
    let mut out = Extraction::default();
    if module.is_appliance {
        return Ok(out);
    }

    let shelves = shelf_count(module)?;
    for rule in part_rules(module, shelves, door_count(module)) {
        if rule.width <= 0 || rule.height <= 0 {
            match policy {
                GeometryPolicy::Abort => {
                    return Err(PlanError::InvalidModuleGeometry {
                        module_id: module.id.clone(),
                        module_name: module.name.clone(),
                        part: rule.part,
                        width: rule.width,
                        height: rule.height,
                    });
                }
                GeometryPolicy::Skip => {
                    warn!(
                        module_id = %module.id,
                        part = %rule.part,
                        width = rule.width,
                        height = rule.height,
                        "skipping piece with non-positive dimensions"
                    );
                    out.warnings.push(PlanWarning::SkippedPiece {
                        module_id: module.id.clone(),
                        module_name: module.name.clone(),
                        part: rule.part,
                        width: rule.width,
                        height: rule.height,
                    });
                    continue;
                }
            }
        }

        out.pieces.push(CutPiece {
            id: format!("{}-{}", module.id, rule.part.as_str().to_lowercase()),
            module_id: module.id.clone(),
            module_name: module.name.clone(),
            part: rule.part,
            width: rule.width as u32,
            height: rule.height as u32,
            quantity: rule.quantity,
            material: rule
                .material
                .map(str::to_string)
                .unwrap_or_else(|| module.material.clone()),
            edge_banding: rule.edge_banding.to_string(),
            grain: rule.grain,
        });
    }

    debug!(module_id = %module.id, pieces = out.pieces.len(), "extracted module");
    Ok(out)
}

/// Derives the cut list of a whole project, in module order.
pub fn extract_pieces(modules: &[FurnitureModule], policy: GeometryPolicy) -> Result<Extraction> {
    let mut out = Extraction::default();
    for module in modules.iter().filter(|m| !m.is_appliance) {
        let mut extracted = extract_module(module, policy)?;
        out.pieces.append(&mut extracted.pieces);
        out.warnings.append(&mut extracted.warnings);
    }
    Ok(out)
}
