//! Area, waste and cost figures of a packed plan.

use crate::config::PlanConfig;
use crate::group::MaterialGroup;
use crate::guillotine::SheetBin;
use crate::types::{CutPiece, CuttingSheet, MaterialSummary, Stats};

const MM2_PER_M2: f64 = 1_000_000.0;

pub fn waste_percentage(used_area: u64, sheet_area: u64) -> f64 {
    if sheet_area == 0 {
        return 0.0;
    }
    100.0 - used_area as f64 / sheet_area as f64 * 100.0
}

fn to_m2(mm2: u64) -> f64 {
    mm2 as f64 / MM2_PER_M2
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}

/// Closes a sheet: freezes its placements and computes used area and waste.
pub fn finalize_sheet(bin: SheetBin, material: &str, id: usize) -> CuttingSheet {
    let stock = bin.stock();
    let used_area = bin.used_area();
    CuttingSheet {
        id,
        material: material.to_string(),
        width: stock.w,
        height: stock.h,
        placements: bin.placements,
        used_area,
        waste_percentage: waste_percentage(used_area, stock.area()),
    }
}

/// Project-wide figures. `pieces` is the cut list before quantity expansion.
pub fn summarize(pieces: &[CutPiece], sheets: &[CuttingSheet], config: &PlanConfig) -> Stats {
    let sheet_area: u64 = sheets.iter().map(|s| s.stock().area()).sum();
    let used_area: u64 = sheets.iter().map(|s| s.used_area).sum();
    Stats {
        total_pieces: pieces.iter().map(|p| p.quantity as u64).sum(),
        total_sheets: sheets.len(),
        avg_waste: mean(sheets.iter().map(|s| s.waste_percentage)),
        total_sheet_area: to_m2(sheet_area),
        used_area: to_m2(used_area),
        sheet_cost: sheets.len() as f64 * config.sheet_price,
    }
}

pub fn summarize_materials(groups: &[MaterialGroup], sheets: &[CuttingSheet]) -> Vec<MaterialSummary> {
    groups
        .iter()
        .map(|g| {
            let own = move || sheets.iter().filter(move |s| s.material == g.material);
            MaterialSummary {
                material: g.material.clone(),
                pieces: g.piece_count(),
                sheets: own().count(),
                used_area: to_m2(own().map(|s| s.used_area).sum()),
                sheet_area: to_m2(own().map(|s| s.stock().area()).sum()),
                avg_waste: mean(own().map(|s| s.waste_percentage)),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GrainDirection, PartLabel, Rect};

    fn piece(w: u32, h: u32, quantity: u32) -> CutPiece {
        CutPiece {
            id: format!("p{w}x{h}"),
            module_id: "m1".into(),
            module_name: "Base".into(),
            part: PartLabel::Top,
            width: w,
            height: h,
            quantity,
            material: "Branco Tx".into(),
            edge_banding: String::new(),
            grain: GrainDirection::Horizontal,
        }
    }

    fn sheet_with(pieces: &[(u32, u32, bool)]) -> CuttingSheet {
        let mut bin = SheetBin::new(Rect::new(1000, 1000), 0, 0);
        for &(w, h, horizontal) in pieces {
            let mut p = piece(w, h, 1);
            if !horizontal {
                p.grain = GrainDirection::Vertical;
            }
            bin.try_place(p).unwrap();
        }
        finalize_sheet(bin, "Branco Tx", 1)
    }

    #[test]
    fn test_waste_percentage() {
        assert_eq!(waste_percentage(0, 100), 100.0);
        assert_eq!(waste_percentage(100, 100), 0.0);
        assert!((waste_percentage(25, 100) - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_rotation_does_not_change_used_area() {
        let mut bin = SheetBin::new(Rect::new(1000, 500), 0, 0);
        bin.try_place(piece(400, 800, 1)).unwrap();
        let sheet = finalize_sheet(bin, "Branco Tx", 1);
        assert!(sheet.placements[0].rotated);
        assert_eq!(sheet.used_area, 320_000);
        assert!((sheet.waste_percentage - 36.0).abs() < 1e-9);
    }

    #[test]
    fn test_finalize_sheet() {
        let sheet = sheet_with(&[(500, 500, true), (500, 200, true)]);
        assert_eq!(sheet.used_area, 350_000);
        assert!((sheet.waste_percentage - 65.0).abs() < 1e-9);
        assert_eq!((sheet.width, sheet.height), (1000, 1000));
    }

    #[test]
    fn test_summarize() {
        let a = sheet_with(&[(500, 500, true)]);
        let mut b = sheet_with(&[(1000, 500, true)]);
        b.id = 2;
        let pieces = vec![piece(500, 500, 1), piece(1000, 500, 1), piece(10, 10, 0)];
        let config = PlanConfig::new().with_sheet_price(250.0);
        let stats = summarize(&pieces, &[a, b], &config);
        assert_eq!(stats.total_pieces, 2);
        assert_eq!(stats.total_sheets, 2);
        assert!((stats.avg_waste - 62.5).abs() < 1e-9);
        assert!((stats.total_sheet_area - 2.0).abs() < 1e-9);
        assert!((stats.used_area - 0.75).abs() < 1e-9);
        assert_eq!(stats.sheet_cost, 500.0);
    }

    #[test]
    fn test_summarize_empty() {
        let stats = summarize(&[], &[], &PlanConfig::default());
        assert_eq!(stats.total_sheets, 0);
        assert_eq!(stats.avg_waste, 0.0);
        assert_eq!(stats.sheet_cost, 0.0);
    }

    #[test]
    fn test_summarize_materials() {
        let groups = vec![
            MaterialGroup {
                material: "Branco Tx".into(),
                pieces: vec![piece(500, 500, 2)],
            },
            MaterialGroup {
                material: "Carvalho".into(),
                pieces: vec![],
            },
        ];
        let sheet = sheet_with(&[(500, 500, true), (500, 500, true)]);
        let summary = summarize_materials(&groups, &[sheet]);
        assert_eq!(summary[0].pieces, 2);
        assert_eq!(summary[0].sheets, 1);
        assert!((summary[0].used_area - 0.5).abs() < 1e-9);
        assert!((summary[0].avg_waste - 50.0).abs() < 1e-9);
        assert_eq!(summary[1].sheets, 0);
    }
}
