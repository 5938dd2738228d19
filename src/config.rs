//! Tunables of the cutting-plan pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};
use crate::types::Rect;

pub const DEFAULT_SHEET_WIDTH: u32 = 2750;
pub const DEFAULT_SHEET_HEIGHT: u32 = 1850;
pub const DEFAULT_KERF: u32 = 4;
pub const DEFAULT_MIN_REMNANT: u32 = 50;
pub const DEFAULT_MAX_INSTANCES: u64 = 10_000;

/// What to do with a piece whose derived dimensions are not positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GeometryPolicy {
    /// Fail the whole plan.
    #[default]
    Abort,
    /// Drop the piece and report a warning.
    Skip,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlanConfig {
    /// Stock sheet width in mm.
    pub sheet_width: u32,
    /// Stock sheet height in mm.
    pub sheet_height: u32,
    /// Saw blade width reserved after every piece, in mm.
    pub kerf: u32,
    /// Free fragments not larger than this (after kerf) in either direction are scrap.
    pub min_remnant: u32,
    /// Price of one stock sheet, any currency.
    pub sheet_price: f64,
    pub geometry_policy: GeometryPolicy,
    /// Materials the caller expects. Empty disables the unknown-material warning.
    pub known_materials: Vec<String>,
    /// Most boards a single material group may expand to.
    pub max_instances: u64,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            sheet_width: DEFAULT_SHEET_WIDTH,
            sheet_height: DEFAULT_SHEET_HEIGHT,
            kerf: DEFAULT_KERF,
            min_remnant: DEFAULT_MIN_REMNANT,
            sheet_price: 0.0,
            geometry_policy: GeometryPolicy::Abort,
            known_materials: Vec::new(),
            max_instances: DEFAULT_MAX_INSTANCES,
        }
    }
}

impl PlanConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, width: u32, height: u32) -> Self {
        self.sheet_width = width;
        self.sheet_height = height;
        self
    }

    pub fn with_kerf(mut self, kerf: u32) -> Self {
        self.kerf = kerf;
        self
    }

    pub fn with_min_remnant(mut self, min_remnant: u32) -> Self {
        self.min_remnant = min_remnant;
        self
    }

    pub fn with_sheet_price(mut self, price: f64) -> Self {
        self.sheet_price = price;
        self
    }

    pub fn with_geometry_policy(mut self, policy: GeometryPolicy) -> Self {
        self.geometry_policy = policy;
        self
    }

    pub fn with_known_materials<I, S>(mut self, materials: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_materials = materials.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_instances(mut self, max: u64) -> Self {
        self.max_instances = max;
        self
    }

    pub fn stock(&self) -> Rect {
        Rect::new(self.sheet_width, self.sheet_height)
    }

    pub fn is_known_material(&self, material: &str) -> bool {
        self.known_materials.is_empty() || self.known_materials.iter().any(|m| m == material)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sheet_width == 0 || self.sheet_height == 0 {
            return Err(PlanError::InvalidConfig(format!(
                "sheet dimensions must be non-zero, got {}",
                self.stock()
            )));
        }
        if self.kerf >= self.sheet_width.min(self.sheet_height) {
            return Err(PlanError::InvalidConfig(format!(
                "kerf {}mm leaves no usable area on a {} sheet",
                self.kerf,
                self.stock()
            )));
        }
        if self.max_instances == 0 {
            return Err(PlanError::InvalidConfig(
                "max instances must be at least 1".to_string(),
            ));
        }
        if !self.sheet_price.is_finite() || self.sheet_price < 0.0 {
            return Err(PlanError::InvalidConfig(format!(
                "sheet price must be a non-negative number, got {}",
                self.sheet_price
            )));
        }
        Ok(())
    }
}
