//! Errors raised while building a cutting plan.

use thiserror::Error;

use crate::types::PartLabel;

pub type Result<T> = std::result::Result<T, PlanError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// A parametric rule produced a non-positive board dimension.
    #[error(
        "module '{module_name}' ({module_id}) is too small: {part} would be {width}x{height}mm"
    )]
    InvalidModuleGeometry {
        module_id: String,
        module_name: String,
        part: PartLabel,
        width: i64,
        height: i64,
    },

    /// A piece that no allowed orientation fits onto an empty stock sheet.
    #[error(
        "{part} {width}x{height}mm of module '{module_name}' ({module_id}) does not fit on a {sheet_width}x{sheet_height}mm sheet"
    )]
    PieceTooLarge {
        module_id: String,
        module_name: String,
        part: PartLabel,
        width: u32,
        height: u32,
        sheet_width: u32,
        sheet_height: u32,
    },

    /// More parts of one kind than the module can physically hold.
    #[error(
        "module '{module_name}' ({module_id}) asks for {count} {part} pieces, at most {max} fit"
    )]
    InvalidPartCount {
        module_id: String,
        module_name: String,
        part: PartLabel,
        count: u32,
        max: u32,
    },

    /// A material group expands to more boards than the configured limit.
    #[error("{material} needs {count} boards, more than the limit of {max}")]
    TooManyPieces {
        material: String,
        count: u64,
        max: u64,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PlanError {
    pub fn kind(&self) -> &'static str {
        match self {
            PlanError::InvalidModuleGeometry { .. } => "invalidModuleGeometry",
            PlanError::PieceTooLarge { .. } => "pieceTooLarge",
            PlanError::InvalidPartCount { .. } => "invalidPartCount",
            PlanError::TooManyPieces { .. } => "tooManyPieces",
            PlanError::InvalidConfig(_) => "invalidConfig",
        }
    }

    pub fn module_id(&self) -> Option<&str> {
        match self {
            PlanError::InvalidModuleGeometry { module_id, .. }
            | PlanError::PieceTooLarge { module_id, .. }
            | PlanError::InvalidPartCount { module_id, .. } => Some(module_id),
            PlanError::TooManyPieces { .. } | PlanError::InvalidConfig(_) => None,
        }
    }

    pub fn part(&self) -> Option<PartLabel> {
        match self {
            PlanError::InvalidModuleGeometry { part, .. }
            | PlanError::PieceTooLarge { part, .. }
            | PlanError::InvalidPartCount { part, .. } => Some(*part),
            PlanError::TooManyPieces { .. } | PlanError::InvalidConfig(_) => None,
        }
    }
}
