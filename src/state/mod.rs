pub mod context;

pub use context::EditorContext;

use egui::Pos2;

use crate::surface::Snapshot;
use crate::tools::Mode;

/// Where the current pointer gesture is at.
///
/// Each active variant carries the committed snapshot the gesture started
/// from, so a gesture can always be rolled back without consulting history.
#[derive(Debug, Clone, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// Pencil or eraser stroke, drawn incrementally
    FreeDrawing {
        last_point: Pos2,
        base: Snapshot,
    },
    /// Line, rectangle, circle or triangle preview, redrawn from `base` on every move
    ShapeDrawing {
        origin: Pos2,
        mode: Mode,
        base: Snapshot,
    },
}

impl GestureState {
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::FreeDrawing { .. } => "FreeDrawing",
            Self::ShapeDrawing { .. } => "ShapeDrawing",
        }
    }
}
