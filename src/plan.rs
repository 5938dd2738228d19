//! The whole pipeline: modules in, cut list, sheets and statistics out.

use tracing::info;

use crate::config::PlanConfig;
use crate::error::Result;
use crate::extract::extract_pieces;
use crate::group::{group_by_material, unknown_materials};
use crate::packer::pack_group;
use crate::stats::{summarize, summarize_materials};
use crate::types::{CuttingPlan, CuttingSheet, FurnitureModule};

/// Builds a cutting plan from scratch. Deterministic: the same modules and
/// configuration always give the same plan.
pub fn build_plan(modules: &[FurnitureModule], config: &PlanConfig) -> Result<CuttingPlan> {
    config.validate()?;

    let extraction = extract_pieces(modules, config.geometry_policy)?;
    let groups = group_by_material(&extraction.pieces);

    let mut warnings = extraction.warnings;
    warnings.extend(unknown_materials(&groups, config));

    let mut sheets: Vec<CuttingSheet> = Vec::new();
    for group in &groups {
        sheets.extend(pack_group(group, config)?);
    }
    for (i, sheet) in sheets.iter_mut().enumerate() {
        sheet.id = i + 1;
    }

    let stats = summarize(&extraction.pieces, &sheets, config);
    let materials = summarize_materials(&groups, &sheets);

    info!(
        modules = modules.len(),
        pieces = stats.total_pieces,
        sheets = stats.total_sheets,
        avg_waste = %format!("{:.1}", stats.avg_waste),
        warnings = warnings.len(),
        "built cutting plan"
    );

    Ok(CuttingPlan {
        pieces: extraction.pieces,
        sheets,
        stats,
        materials,
        warnings,
    })
}
