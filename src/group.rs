//! Grouping of the cut list by board material.

use std::collections::HashMap;

use tracing::warn;

use crate::config::PlanConfig;
use crate::types::{CutPiece, PlanWarning};

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialGroup {
    pub material: String,
    /// Pieces in extraction order, quantities not yet expanded.
    pub pieces: Vec<CutPiece>,
}

impl MaterialGroup {
    /// Sum of the pre-expansion quantities.
    pub fn piece_count(&self) -> u64 {
        self.pieces.iter().map(|p| p.quantity as u64).sum()
    }

    pub fn instances(&self) -> Vec<CutPiece> {
        expand(&self.pieces)
    }
}

/// Groups pieces by exact material name. Groups come out in order of first appearance.
pub fn group_by_material(pieces: &[CutPiece]) -> Vec<MaterialGroup> {
    let mut groups: Vec<MaterialGroup> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for piece in pieces {
        let gi = *index.entry(piece.material.as_str()).or_insert_with(|| {
            groups.push(MaterialGroup {
                material: piece.material.clone(),
                pieces: Vec::new(),
            });
            groups.len() - 1
        });
        groups[gi].pieces.push(piece.clone());
    }

    groups
}

/// Flags groups whose material the configuration does not list.
pub fn unknown_materials(groups: &[MaterialGroup], config: &PlanConfig) -> Vec<PlanWarning> {
    groups
        .iter()
        .filter(|g| !config.is_known_material(&g.material))
        .map(|g| {
            warn!(material = %g.material, "unknown material, packing it as its own group");
            PlanWarning::UnknownMaterial {
                material: g.material.clone(),
            }
        })
        .collect()
}

/// One quantity-1 instance per physical board, ids suffixed `-1`, `-2`, ...
/// when a piece has more than one.
pub fn expand(pieces: &[CutPiece]) -> Vec<CutPiece> {
    let mut out = Vec::with_capacity(pieces.iter().map(|p| p.quantity as usize).sum());
    for piece in pieces {
        if piece.quantity == 1 {
            out.push(piece.clone());
            continue;
        }
        for n in 1..=piece.quantity {
            out.push(CutPiece {
                id: format!("{}-{}", piece.id, n),
                quantity: 1,
                ..piece.clone()
            });
        }
    }
    out
}
