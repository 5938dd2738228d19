//! First-fit-decreasing guillotine packing of one material group.

use tracing::debug;

use crate::config::PlanConfig;
use crate::error::{PlanError, Result};
use crate::group::MaterialGroup;
use crate::guillotine::SheetBin;
use crate::stats::finalize_sheet;
use crate::types::{CutPiece, CuttingSheet};

/// Largest pieces first; the sort is stable so equal areas keep extraction order.
pub fn sort_for_packing(instances: &mut [CutPiece]) {
    instances.sort_by(|a, b| b.area().cmp(&a.area()));
}

/// Packs every instance of `group` onto as many stock sheets as the heuristic needs.
///
/// Only the sheet being filled is searched; once a piece does not fit it is closed
/// for good. Sheets are numbered from 1 within the group.
pub fn pack_group(group: &MaterialGroup, config: &PlanConfig) -> Result<Vec<CuttingSheet>> {
    config.validate()?;

    let count = group.piece_count();
    if count > config.max_instances {
        return Err(PlanError::TooManyPieces {
            material: group.material.clone(),
            count,
            max: config.max_instances,
        });
    }

    let mut instances = group.instances();
    sort_for_packing(&mut instances);

    let new_bin = || SheetBin::new(config.stock(), config.kerf, config.min_remnant);
    let mut sheets: Vec<CuttingSheet> = Vec::new();
    let mut current: Option<SheetBin> = None;

    for piece in instances {
        let piece = match current.as_mut() {
            Some(bin) => match bin.try_place(piece) {
                Ok(_) => continue,
                Err(piece) => piece,
            },
            None => piece,
        };

        let mut bin = new_bin();
        if !bin.fits_empty(&piece) {
            return Err(too_large(&piece, config));
        }
        bin.try_place(piece).map_err(|p| too_large(&p, config))?;
        if let Some(done) = current.replace(bin) {
            sheets.push(finalize_sheet(done, &group.material, sheets.len() + 1));
        }
    }

    if let Some(done) = current {
        sheets.push(finalize_sheet(done, &group.material, sheets.len() + 1));
    }

    debug!(
        material = %group.material,
        pieces = group.piece_count(),
        sheets = sheets.len(),
        "packed material group"
    );
    Ok(sheets)
}

fn too_large(piece: &CutPiece, config: &PlanConfig) -> PlanError {
    PlanError::PieceTooLarge {
        module_id: piece.module_id.clone(),
        module_name: piece.module_name.clone(),
        part: piece.part,
        width: piece.width,
        height: piece.height,
        sheet_width: config.sheet_width,
        sheet_height: config.sheet_height,
    }
}
