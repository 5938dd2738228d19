//! Cutting plans for parametric furniture modules.
//!
//! `modules → extract → group → pack → stats`, each stage a pure function of its
//! input. [`plan::build_plan`] runs the whole pipeline.

pub mod config;
pub mod error;
pub mod extract;
pub mod group;
pub mod guillotine;
pub mod packer;
pub mod plan;
pub mod render;
pub mod stats;
pub mod types;

pub use config::{GeometryPolicy, PlanConfig};
pub use error::{PlanError, Result};
pub use plan::build_plan;
pub use types::{
    CutPiece, CuttingPlan, CuttingSheet, FurnitureModule, GrainDirection, PartLabel, PlacedPiece,
    PlanWarning, Stats,
};
