use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    pub fn rotated(&self) -> Self {
        Self {
            w: self.h,
            h: self.w,
        }
    }

    /// True when `self` plus `kerf` clearance on its trailing edges fits in `other`.
    pub fn fits_in_with_kerf(&self, other: &Rect, kerf: u32) -> bool {
        self.w as u64 + kerf as u64 <= other.w as u64
            && self.h as u64 + kerf as u64 <= other.h as u64
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartLabel {
    Side,
    Top,
    Bottom,
    Back,
    Shelf,
    Door,
}

impl PartLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartLabel::Side => "Side",
            PartLabel::Top => "Top",
            PartLabel::Bottom => "Bottom",
            PartLabel::Back => "Back",
            PartLabel::Shelf => "Shelf",
            PartLabel::Door => "Door",
        }
    }
}

impl std::fmt::Display for PartLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of the wood grain on a board. Vertical grain pins the piece's orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrainDirection {
    Horizontal,
    Vertical,
    None,
}

impl GrainDirection {
    pub fn allows_rotation(&self) -> bool {
        !matches!(self, GrainDirection::Vertical)
    }
}

/// A furniture module as handed over by the project editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FurnitureModule {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub module_type: String,
    #[serde(default)]
    pub category: String,
    pub width: i32,
    pub height: i32,
    pub depth: i32,
    pub material: String,
    #[serde(default)]
    pub is_appliance: bool,
    /// Overrides the door count otherwise guessed from `module_type`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub door_count: Option<u32>,
    /// Overrides the height-derived shelf count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shelf_count: Option<u32>,
}

impl FurnitureModule {
    pub fn new(
        id: impl Into<String>,
        module_type: impl Into<String>,
        width: i32,
        height: i32,
        depth: i32,
        material: impl Into<String>,
    ) -> Self {
        let id = id.into();
        let module_type = module_type.into();
        Self {
            name: module_type.clone(),
            id,
            module_type,
            category: String::new(),
            width,
            height,
            depth,
            material: material.into(),
            is_appliance: false,
            door_count: None,
            shelf_count: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_doors(mut self, doors: u32) -> Self {
        self.door_count = Some(doors);
        self
    }

    pub fn with_shelves(mut self, shelves: u32) -> Self {
        self.shelf_count = Some(shelves);
        self
    }

    pub fn appliance(mut self) -> Self {
        self.is_appliance = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CutPiece {
    pub id: String,
    pub module_id: String,
    pub module_name: String,
    pub part: PartLabel,
    pub width: u32,
    pub height: u32,
    pub quantity: u32,
    pub material: String,
    pub edge_banding: String,
    pub grain: GrainDirection,
}

impl CutPiece {
    pub fn rect(&self) -> Rect {
        Rect::new(self.width, self.height)
    }

    /// Area of a single unit, in mm².
    pub fn area(&self) -> u64 {
        self.rect().area()
    }

    pub fn total_area(&self) -> u64 {
        self.area() * self.quantity as u64
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedPiece {
    #[serde(flatten)]
    pub piece: CutPiece,
    pub x: u32,
    pub y: u32,
    pub rotated: bool,
}

impl PlacedPiece {
    /// The rectangle the piece occupies on the sheet, orientation applied.
    pub fn footprint(&self) -> Rect {
        if self.rotated {
            self.piece.rect().rotated()
        } else {
            self.piece.rect()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CuttingSheet {
    pub id: usize,
    pub material: String,
    pub width: u32,
    pub height: u32,
    pub placements: Vec<PlacedPiece>,
    pub used_area: u64,
    pub waste_percentage: f64,
}

impl CuttingSheet {
    pub fn stock(&self) -> Rect {
        Rect::new(self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_pieces: u64,
    pub total_sheets: usize,
    pub avg_waste: f64,
    /// m²
    pub total_sheet_area: f64,
    /// m²
    pub used_area: f64,
    pub sheet_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialSummary {
    pub material: String,
    pub pieces: u64,
    pub sheets: usize,
    pub used_area: f64,
    pub sheet_area: f64,
    pub avg_waste: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PlanWarning {
    UnknownMaterial {
        material: String,
    },
    #[serde(rename_all = "camelCase")]
    SkippedPiece {
        module_id: String,
        module_name: String,
        part: PartLabel,
        width: i64,
        height: i64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CuttingPlan {
    pub pieces: Vec<CutPiece>,
    pub sheets: Vec<CuttingSheet>,
    pub stats: Stats,
    pub materials: Vec<MaterialSummary>,
    pub warnings: Vec<PlanWarning>,
}
