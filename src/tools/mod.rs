use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::state::GestureState;
use crate::style::Style;
use crate::surface::{Snapshot, Surface};

pub mod shapes;

pub use shapes::Shape;

/// The active drawing tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Pencil
    #[default]
    Free,
    /// Paints with the background color
    Eraser,
    Line,
    Rectangle,
    Circle,
    Triangle,
}

impl Mode {
    pub const ALL: [Mode; 6] = [
        Mode::Free,
        Mode::Eraser,
        Mode::Line,
        Mode::Rectangle,
        Mode::Circle,
        Mode::Triangle,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Free => "Pencil",
            Mode::Eraser => "Eraser",
            Mode::Line => "Line",
            Mode::Rectangle => "Rectangle",
            Mode::Circle => "Circle",
            Mode::Triangle => "Triangle",
        }
    }

    /// Freehand modes draw incrementally; everything else previews a shape.
    pub fn is_freehand(&self) -> bool {
        matches!(self, Mode::Free | Mode::Eraser)
    }
}

/// Geometry for a shape-mode drag from `origin` to `current`.
///
/// `constrain` only affects line mode. Freehand modes have no shape.
pub fn shape_for(mode: Mode, origin: Pos2, current: Pos2, constrain: bool) -> Option<Shape> {
    match mode {
        Mode::Free | Mode::Eraser => None,
        Mode::Line => Some(shapes::line(origin, current, constrain)),
        Mode::Rectangle => Some(shapes::rectangle(origin, current)),
        Mode::Circle => Some(shapes::circle_through(origin, current)),
        Mode::Triangle => Some(shapes::equilateral_triangle(origin, current)),
    }
}

/// Tracks the selected mode and the gesture in progress, and turns pointer
/// events into drawing on a [`Surface`].
#[derive(Debug, Clone, Default)]
pub struct ToolStateMachine {
    mode: Mode,
    gesture: GestureState,
    /// Mode the eraser toggle returns to
    last_drawing_mode: Mode,
}

impl ToolStateMachine {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            gesture: GestureState::Idle,
            last_drawing_mode: if mode == Mode::Eraser { Mode::Free } else { mode },
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn gesture(&self) -> &GestureState {
        &self.gesture
    }

    pub fn is_active(&self) -> bool {
        self.gesture.is_active()
    }

    /// Switch tools. A gesture in progress is discarded first, so the surface
    /// goes back to the committed state it started from.
    ///
    /// Returns true if a gesture was discarded.
    pub fn select_mode(&mut self, mode: Mode, surface: &mut Surface) -> bool {
        let discarded = self.cancel(surface);
        if mode != Mode::Eraser {
            self.last_drawing_mode = mode;
        }
        if mode != self.mode {
            log::info!("Tool changed: {} -> {}", self.mode.name(), mode.name());
        }
        self.mode = mode;
        discarded
    }

    /// Eraser if not erasing, otherwise the last drawing mode.
    pub fn toggle_eraser(&mut self, surface: &mut Surface) -> bool {
        let next = if self.mode == Mode::Eraser {
            self.last_drawing_mode
        } else {
            Mode::Eraser
        };
        self.select_mode(next, surface)
    }

    /// Abandon the gesture in progress and restore the surface to where it began.
    ///
    /// Returns true if there was a gesture to abandon.
    pub fn cancel(&mut self, surface: &mut Surface) -> bool {
        match std::mem::take(&mut self.gesture) {
            GestureState::Idle => false,
            GestureState::FreeDrawing { base, .. } | GestureState::ShapeDrawing { base, .. } => {
                log::debug!("Discarding {} gesture", self.mode.name());
                surface.restore(&base);
                true
            }
        }
    }

    /// Start a gesture at `pos`. `committed` must be the state currently on the surface.
    pub fn on_pointer_down(&mut self, pos: Pos2, committed: Snapshot) {
        if self.gesture.is_active() {
            log::debug!("Ignoring pointer down during {}", self.gesture.name());
            return;
        }
        self.gesture = if self.mode.is_freehand() {
            GestureState::FreeDrawing {
                last_point: pos,
                base: committed,
            }
        } else {
            GestureState::ShapeDrawing {
                origin: pos,
                mode: self.mode,
                base: committed,
            }
        };
    }

    /// Extend the freehand stroke, or redraw the shape preview, up to `pos`.
    /// Ignored when no gesture is active.
    pub fn on_pointer_move(&mut self, pos: Pos2, modifier: bool, surface: &mut Surface, style: &Style) {
        let mode = self.mode;
        match &mut self.gesture {
            GestureState::Idle => {}
            GestureState::FreeDrawing { last_point, .. } => {
                let style = freehand_style(mode, surface, style);
                surface.stroke_segment(*last_point, pos, &style);
                *last_point = pos;
            }
            GestureState::ShapeDrawing { origin, mode, base } => {
                render_shape(surface, base, *mode, *origin, pos, modifier, style);
            }
        }
    }

    /// Finish the gesture at `pos`.
    ///
    /// Returns the snapshot to commit, or `None` when no gesture was active or
    /// the gesture left the surface unchanged.
    pub fn on_pointer_up(
        &mut self,
        pos: Pos2,
        modifier: bool,
        surface: &mut Surface,
        style: &Style,
    ) -> Option<Snapshot> {
        let base = match std::mem::take(&mut self.gesture) {
            GestureState::Idle => return None,
            GestureState::FreeDrawing { last_point, base } => {
                if last_point != pos {
                    let style = freehand_style(self.mode, surface, style);
                    surface.stroke_segment(last_point, pos, &style);
                }
                base
            }
            GestureState::ShapeDrawing { origin, mode, base } => {
                if pos == origin {
                    // Zero-size shape, nothing to draw
                    surface.restore(&base);
                    log::debug!("{} click without drag", mode.name());
                    return None;
                }
                // The last preview may lag the release point
                render_shape(surface, &base, mode, origin, pos, modifier, style);
                base
            }
        };

        if surface.matches(&base) {
            log::debug!("{} gesture left the canvas unchanged", self.mode.name());
            None
        } else {
            Some(surface.snapshot())
        }
    }
}

fn freehand_style(mode: Mode, surface: &Surface, style: &Style) -> Style {
    if mode == Mode::Eraser {
        style.with_color(surface.background())
    } else {
        *style
    }
}

fn render_shape(
    surface: &mut Surface,
    base: &Snapshot,
    mode: Mode,
    origin: Pos2,
    current: Pos2,
    constrain: bool,
    style: &Style,
) {
    surface.restore(base);
    if let Some(shape) = shape_for(mode, origin, current, constrain) {
        surface.stroke_shape(&shape, style);
    }
}
