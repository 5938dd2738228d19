use crate::types::CuttingSheet;

const MAX_WIDTH: f64 = 80.0;
const MAX_HEIGHT: f64 = 40.0;

/// ASCII drawing of one sheet, each piece boxed and labelled with its part and size.
pub fn render_sheet(sheet: &CuttingSheet) -> String {
    let stock = sheet.stock();
    let scale = f64::min(MAX_WIDTH / stock.w as f64, MAX_HEIGHT / stock.h as f64);
    let grid_w = (stock.w as f64 * scale).round() as usize;
    let grid_h = (stock.h as f64 * scale).round() as usize;

    if grid_w == 0 || grid_h == 0 {
        return String::new();
    }

    let mut grid = vec![vec![' '; grid_w + 1]; grid_h + 1];

    draw_rect(&mut grid, 0, 0, grid_w, grid_h);

    for p in &sheet.placements {
        let f = p.footprint();
        let sx = (p.x as f64 * scale).round() as usize;
        let sy = (p.y as f64 * scale).round() as usize;
        let sw = (f.w as f64 * scale).round() as usize;
        let sh = (f.h as f64 * scale).round() as usize;

        if sw == 0 || sh == 0 {
            continue;
        }

        draw_rect(&mut grid, sx, sy, sw, sh);

        // Prefer "Door 396x716", fall back to the part alone when the box is narrow
        let full = format!("{} {}", p.piece.part, f);
        let label = if full.chars().count() < sw {
            full
        } else {
            p.piece.part.to_string()
        };
        let label_chars: Vec<char> = label.chars().collect();

        if sw > 2 && sh > 0 {
            let cx = sx + sw / 2;
            let cy = sy + sh / 2;
            let start_x = cx.saturating_sub(label_chars.len() / 2);

            for (i, &ch) in label_chars.iter().enumerate() {
                let x = start_x + i;
                if x > sx && x < sx + sw && cy > sy && cy < sy + sh {
                    grid[cy][x] = ch;
                }
            }
        }
    }

    let mut result = String::new();
    for row in &grid {
        let line: String = row.iter().collect();
        result.push_str(line.trim_end());
        result.push('\n');
    }
    result
}

fn edge(current: char, crossing: char, own: char) -> char {
    if current == crossing || current == '+' {
        '+'
    } else {
        own
    }
}

#[allow(clippy::needless_range_loop)]
fn draw_rect(grid: &mut [Vec<char>], x: usize, y: usize, w: usize, h: usize) {
    let rows = grid.len();
    let cols = if rows > 0 { grid[0].len() } else { return };

    for i in x..=x + w {
        if i >= cols {
            break;
        }
        for j in [y, y + h] {
            if j < rows {
                grid[j][i] = edge(grid[j][i], '|', '-');
            }
        }
    }

    for j in y..=y + h {
        if j >= rows {
            break;
        }
        for i in [x, x + w] {
            if i < cols {
                grid[j][i] = edge(grid[j][i], '-', '|');
            }
        }
    }

    for cx in [x, x + w] {
        for cy in [y, y + h] {
            if cy < rows && cx < cols {
                grid[cy][cx] = '+';
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CutPiece, GrainDirection, PartLabel, PlacedPiece};

    fn placed(part: PartLabel, w: u32, h: u32, x: u32, y: u32, rotated: bool) -> PlacedPiece {
        PlacedPiece {
            piece: CutPiece {
                id: format!("m1-{part}"),
                module_id: "m1".into(),
                module_name: "Base".into(),
                part,
                width: w,
                height: h,
                quantity: 1,
                material: "Branco Tx".into(),
                edge_banding: String::new(),
                grain: GrainDirection::Horizontal,
            },
            x,
            y,
            rotated,
        }
    }

    fn sheet(w: u32, h: u32, placements: Vec<PlacedPiece>) -> CuttingSheet {
        CuttingSheet {
            id: 1,
            material: "Branco Tx".into(),
            width: w,
            height: h,
            placements,
            used_area: 0,
            waste_percentage: 0.0,
        }
    }

    #[test]
    fn test_render_single_piece() {
        let output = render_sheet(&sheet(2000, 1000, vec![placed(PartLabel::Top, 2000, 1000, 0, 0, false)]));
        assert!(output.contains('+'));
        assert!(output.contains('-'));
        assert!(output.contains('|'));
        assert!(output.contains("Top 2000x1000"));
    }

    #[test]
    fn test_render_rotated_uses_footprint() {
        let output = render_sheet(&sheet(
            2000,
            1000,
            vec![placed(PartLabel::Shelf, 500, 1500, 0, 0, true)],
        ));
        assert!(output.contains("Shelf 1500x500"));
    }

    #[test]
    fn test_render_narrow_piece_keeps_part() {
        let output = render_sheet(&sheet(
            2750,
            1850,
            vec![placed(PartLabel::Side, 300, 1800, 0, 0, false)],
        ));
        assert!(output.contains("Side"));
        assert!(!output.contains("300x1800"));
    }

    #[test]
    fn test_render_empty() {
        let output = render_sheet(&sheet(100, 100, vec![]));
        assert!(output.contains('+'));
    }
}
