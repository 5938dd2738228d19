use tracing::trace;

use crate::types::{CutPiece, PlacedPiece, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreeRect {
    pub x: u32,
    pub y: u32,
    pub rect: Rect,
}

/// The sheet currently being filled: its free-rectangle list and what is already on it.
#[derive(Debug, Clone)]
pub struct SheetBin {
    stock: Rect,
    kerf: u32,
    min_remnant: u32,
    pub free_rects: Vec<FreeRect>,
    pub placements: Vec<PlacedPiece>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub free_idx: usize,
    pub rotated: bool,
}

/// Orientations a piece may be placed in, preferred one first.
/// Vertical grain never rotates; a square gains nothing from rotating.
pub fn orientations(piece: &CutPiece) -> impl Iterator<Item = (Rect, bool)> {
    let rect = piece.rect();
    let rotatable = piece.grain.allows_rotation() && rect.w != rect.h;
    std::iter::once((rect, false)).chain(rotatable.then(|| (rect.rotated(), true)))
}

impl SheetBin {
    pub fn new(stock: Rect, kerf: u32, min_remnant: u32) -> Self {
        Self {
            stock,
            kerf,
            min_remnant,
            free_rects: vec![FreeRect {
                x: 0,
                y: 0,
                rect: stock,
            }],
            placements: Vec::new(),
        }
    }

    pub fn stock(&self) -> Rect {
        self.stock
    }

    pub fn used_area(&self) -> u64 {
        self.placements.iter().map(|p| p.piece.area()).sum()
    }

    /// Whether the piece could go onto a sheet of this size with nothing on it.
    pub fn fits_empty(&self, piece: &CutPiece) -> bool {
        orientations(piece).any(|(r, _)| r.fits_in_with_kerf(&self.stock, self.kerf))
    }

    /// First free rectangle, in list order, that takes the piece in an allowed orientation.
    pub fn find_first(&self, piece: &CutPiece) -> Option<Candidate> {
        self.free_rects.iter().enumerate().find_map(|(idx, free)| {
            orientations(piece)
                .find(|(r, _)| r.fits_in_with_kerf(&free.rect, self.kerf))
                .map(|(_, rotated)| Candidate {
                    free_idx: idx,
                    rotated,
                })
        })
    }

    pub fn place(&mut self, candidate: Candidate, piece: CutPiece) -> &PlacedPiece {
        let free = self.free_rects.remove(candidate.free_idx);
        let placed = if candidate.rotated {
            piece.rect().rotated()
        } else {
            piece.rect()
        };

        trace!(
            piece = %piece.id,
            x = free.x,
            y = free.y,
            size = %placed,
            rotated = candidate.rotated,
            "placed piece"
        );

        self.split(free, placed);
        self.placements.push(PlacedPiece {
            piece,
            x: free.x,
            y: free.y,
            rotated: candidate.rotated,
        });
        let last = self.placements.len() - 1;
        &self.placements[last]
    }

    /// Places the piece at the first fitting position; hands it back when nothing fits.
    pub fn try_place(&mut self, piece: CutPiece) -> Result<&PlacedPiece, CutPiece> {
        match self.find_first(&piece) {
            Some(candidate) => Ok(self.place(candidate, piece)),
            None => Err(piece),
        }
    }

    // Right fragment spans the placed piece's height, bottom fragment the full width.
    fn split(&mut self, free: FreeRect, placed: Rect) {
        let right = FreeRect {
            x: free.x + placed.w + self.kerf,
            y: free.y,
            rect: Rect::new(free.rect.w - placed.w - self.kerf, placed.h),
        };
        let bottom = FreeRect {
            x: free.x,
            y: free.y + placed.h + self.kerf,
            rect: Rect::new(free.rect.w, free.rect.h - placed.h - self.kerf),
        };

        for fragment in [right, bottom] {
            if self.is_useful(fragment.rect) {
                self.free_rects.push(fragment);
            }
        }
    }

    fn is_useful(&self, rect: Rect) -> bool {
        rect.w.saturating_sub(self.kerf) > self.min_remnant
            && rect.h.saturating_sub(self.kerf) > self.min_remnant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GrainDirection, PartLabel};

    fn piece(w: u32, h: u32, grain: GrainDirection) -> CutPiece {
        CutPiece {
            id: format!("p{w}x{h}"),
            module_id: "m1".into(),
            module_name: "Base".into(),
            part: PartLabel::Shelf,
            width: w,
            height: h,
            quantity: 1,
            material: "Branco Tx".into(),
            edge_banding: String::new(),
            grain,
        }
    }

    #[test]
    fn test_place_single_piece() {
        let mut bin = SheetBin::new(Rect::new(100, 100), 0, 0);
        let p = bin
            .try_place(piece(50, 30, GrainDirection::None))
            .unwrap()
            .clone();
        assert_eq!((p.x, p.y), (0, 0));
        assert_eq!(p.footprint(), Rect::new(50, 30));
        assert_eq!(
            bin.free_rects,
            vec![
                FreeRect {
                    x: 50,
                    y: 0,
                    rect: Rect::new(50, 30)
                },
                FreeRect {
                    x: 0,
                    y: 30,
                    rect: Rect::new(100, 70)
                },
            ]
        );
    }

    #[test]
    fn test_piece_too_large() {
        let mut bin = SheetBin::new(Rect::new(100, 100), 0, 0);
        let big = piece(200, 50, GrainDirection::None);
        assert!(bin.find_first(&big).is_none());
        assert!(!bin.fits_empty(&big));
        assert!(bin.try_place(big).is_err());
        assert!(bin.placements.is_empty());
    }

    #[test]
    fn test_rotation_fit() {
        let bin = SheetBin::new(Rect::new(100, 50), 0, 0);
        let candidate = bin.find_first(&piece(50, 100, GrainDirection::Horizontal)).unwrap();
        assert!(candidate.rotated);
        assert!(bin.find_first(&piece(50, 100, GrainDirection::None)).unwrap().rotated);
    }

    #[test]
    fn test_vertical_grain_never_rotates() {
        let bin = SheetBin::new(Rect::new(100, 50), 0, 0);
        let door = piece(50, 100, GrainDirection::Vertical);
        assert!(bin.find_first(&door).is_none());
        assert!(!bin.fits_empty(&door));
    }

    #[test]
    fn test_unrotated_preferred() {
        let bin = SheetBin::new(Rect::new(200, 200), 0, 0);
        let candidate = bin.find_first(&piece(50, 100, GrainDirection::None)).unwrap();
        assert!(!candidate.rotated);
    }

    #[test]
    fn test_first_fit_scans_in_list_order() {
        let mut bin = SheetBin::new(Rect::new(1000, 1000), 0, 0);
        bin.try_place(piece(400, 300, GrainDirection::None)).unwrap();
        // right fragment (600x300) comes before the bottom one (1000x700)
        let p = bin
            .try_place(piece(100, 100, GrainDirection::None))
            .unwrap()
            .clone();
        assert_eq!((p.x, p.y), (400, 0));
    }

    #[test]
    fn test_kerf() {
        let mut bin = SheetBin::new(Rect::new(100, 100), 5, 0);
        bin.try_place(piece(50, 90, GrainDirection::Vertical)).unwrap();
        // Remaining width should be 100 - 50 - 5 = 45
        assert!(bin.free_rects.iter().any(|f| f.x == 55 && f.rect.w == 45));
        // 45 wide pieces need 50mm with kerf
        assert!(bin.find_first(&piece(45, 10, GrainDirection::Vertical)).is_none());
        assert!(bin.find_first(&piece(40, 10, GrainDirection::Vertical)).is_some());
    }

    #[test]
    fn test_kerf_blocks_exact_fit() {
        let bin = SheetBin::new(Rect::new(100, 100), 4, 0);
        assert!(!bin.fits_empty(&piece(100, 100, GrainDirection::None)));
        assert!(bin.fits_empty(&piece(96, 96, GrainDirection::None)));
    }

    #[test]
    fn test_right_fragment_spans_piece_height() {
        let mut bin = SheetBin::new(Rect::new(2750, 1850), 4, 50);
        bin.try_place(piece(562, 720, GrainDirection::Vertical)).unwrap();
        assert_eq!(
            bin.free_rects,
            vec![
                FreeRect {
                    x: 566,
                    y: 0,
                    rect: Rect::new(2184, 720)
                },
                FreeRect {
                    x: 0,
                    y: 724,
                    rect: Rect::new(2750, 1126)
                },
            ]
        );

        // kerf on the trailing edge keeps an equal-height piece out of the right fragment
        let second = bin
            .try_place(piece(562, 720, GrainDirection::Vertical))
            .unwrap()
            .clone();
        assert_eq!((second.x, second.y), (0, 724));
    }

    #[test]
    fn test_small_remnants_discarded() {
        let mut bin = SheetBin::new(Rect::new(100, 100), 0, 50);
        bin.try_place(piece(60, 60, GrainDirection::None)).unwrap();
        // 40x60 and 100x40 are both too thin to keep
        assert!(bin.free_rects.is_empty());
    }

    #[test]
    fn test_fill_exact() {
        let mut bin = SheetBin::new(Rect::new(100, 100), 0, 0);
        bin.try_place(piece(100, 100, GrainDirection::None)).unwrap();
        assert!(bin.free_rects.is_empty());
        assert_eq!(bin.used_area(), 10_000);
    }
}
