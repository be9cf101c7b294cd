mod history;

pub use history::HistoryStack;

use crate::error::SketchResult;
use crate::state::EditorContext;
use crate::tools::Mode;

/// Discrete commands issued by buttons, pickers and keyboard shortcuts
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCommand {
    SelectFree,
    SelectEraser,
    SelectLine,
    SelectRectangle,
    SelectCircle,
    SelectTriangle,
    /// Switch to the eraser, or back to the last drawing mode if already erasing
    ToggleEraser,
    Undo,
    Redo,
    /// Reset the canvas to the background color (undoable)
    Clear,
    /// Set the stroke color from a color spec such as `#ff0000`
    SetColor(String),
    SetLineWidth(f32),
    /// Encode the canvas as PNG
    Export,
}

/// What executing a command produced
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// The command ran (or was a defined no-op)
    Done,
    /// PNG bytes of the current canvas
    Exported(Vec<u8>),
}

impl ToolCommand {
    /// The mode a `Select*` command switches to
    pub fn mode(&self) -> Option<Mode> {
        match self {
            Self::SelectFree => Some(Mode::Free),
            Self::SelectEraser => Some(Mode::Eraser),
            Self::SelectLine => Some(Mode::Line),
            Self::SelectRectangle => Some(Mode::Rectangle),
            Self::SelectCircle => Some(Mode::Circle),
            Self::SelectTriangle => Some(Mode::Triangle),
            _ => None,
        }
    }

    /// The command selecting `mode`
    pub fn select(mode: Mode) -> Self {
        match mode {
            Mode::Free => Self::SelectFree,
            Mode::Eraser => Self::SelectEraser,
            Mode::Line => Self::SelectLine,
            Mode::Rectangle => Self::SelectRectangle,
            Mode::Circle => Self::SelectCircle,
            Mode::Triangle => Self::SelectTriangle,
        }
    }

    pub fn execute(self, ctx: &mut EditorContext) -> SketchResult<CommandOutcome> {
        log::debug!("Executing {:?}", self);
        if let Some(mode) = self.mode() {
            ctx.select_mode(mode);
            return Ok(CommandOutcome::Done);
        }
        match self {
            Self::ToggleEraser => ctx.toggle_eraser(),
            Self::Undo => {
                ctx.undo();
            }
            Self::Redo => {
                ctx.redo();
            }
            Self::Clear => ctx.clear(),
            Self::SetColor(spec) => ctx.style_mut().set_color(&spec)?,
            Self::SetLineWidth(width) => ctx.style_mut().set_line_width(width)?,
            Self::Export => return ctx.export_png().map(CommandOutcome::Exported),
            _ => {}
        }
        Ok(CommandOutcome::Done)
    }
}
