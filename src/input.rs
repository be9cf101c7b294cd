use egui::{Context, Key, KeyboardShortcut, Modifiers, PointerButton, Pos2, Rect};

use crate::command::ToolCommand;
use crate::tools::Mode;

/// Pointer events in canvas-local pixel coordinates.
///
/// `modifier` reports whether shift is held; only line mode looks at it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { position: Pos2, modifier: bool },
    PointerMove { position: Pos2, modifier: bool },
    PointerUp { position: Pos2, modifier: bool },
}

/// Keyboard shortcuts and the commands they issue.
///
/// egui matches shortcuts ignoring extra shift, so the shift variant of a
/// key has to come before the plain one.
pub fn shortcuts() -> [(KeyboardShortcut, ToolCommand); 9] {
    let command = Modifiers::COMMAND;
    [
        (KeyboardShortcut::new(command.plus(Modifiers::SHIFT), Key::Z), ToolCommand::Redo),
        (KeyboardShortcut::new(command, Key::Z), ToolCommand::Undo),
        (KeyboardShortcut::new(command, Key::Y), ToolCommand::Redo),
        (KeyboardShortcut::new(Modifiers::NONE, Key::P), ToolCommand::SelectFree),
        (KeyboardShortcut::new(Modifiers::NONE, Key::E), ToolCommand::ToggleEraser),
        (KeyboardShortcut::new(Modifiers::NONE, Key::L), ToolCommand::SelectLine),
        (KeyboardShortcut::new(Modifiers::NONE, Key::R), ToolCommand::SelectRectangle),
        (KeyboardShortcut::new(Modifiers::NONE, Key::C), ToolCommand::SelectCircle),
        (KeyboardShortcut::new(Modifiers::NONE, Key::T), ToolCommand::SelectTriangle),
    ]
}

/// Shortcut key shown on a mode button
pub fn mode_shortcut(mode: Mode) -> &'static str {
    match mode {
        Mode::Free => "P",
        Mode::Eraser => "E",
        Mode::Line => "L",
        Mode::Rectangle => "R",
        Mode::Circle => "C",
        Mode::Triangle => "T",
    }
}

/// Converts raw egui input over the canvas into [`InputEvent`]s
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    /// True between a press that started on the canvas and its release
    dragging: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Collect this frame's pointer events for the canvas occupying `canvas_rect` on screen.
    ///
    /// Only presses inside `visible_rect`, the part of the canvas not scrolled
    /// out of view, start a gesture.
    pub fn process_input(
        &mut self,
        ctx: &Context,
        canvas_rect: Rect,
        visible_rect: Rect,
    ) -> Vec<InputEvent> {
        let hit_rect = canvas_rect.intersect(visible_rect);
        let mut events = Vec::new();
        let to_local = |pos: Pos2| (pos - canvas_rect.min).to_pos2();

        ctx.input(|input| {
            let modifier = input.modifiers.shift;
            let hover = input.pointer.hover_pos();

            if input.pointer.button_pressed(PointerButton::Primary) {
                if let Some(pos) = hover.filter(|p| hit_rect.contains(*p)) {
                    events.push(InputEvent::PointerDown {
                        position: to_local(pos),
                        modifier,
                    });
                    self.dragging = true;
                    self.last_pointer_pos = Some(pos);
                }
            }

            if self.dragging {
                if let Some(pos) = hover {
                    if Some(pos) != self.last_pointer_pos {
                        events.push(InputEvent::PointerMove {
                            position: to_local(pos),
                            modifier,
                        });
                        self.last_pointer_pos = Some(pos);
                    }
                }
            }

            let released = input.pointer.button_released(PointerButton::Primary)
                || (self.dragging && !input.pointer.primary_down());
            if self.dragging && released {
                // The pointer may have left the window; finish where it was last seen
                if let Some(pos) = hover.or(self.last_pointer_pos) {
                    events.push(InputEvent::PointerUp {
                        position: to_local(pos),
                        modifier,
                    });
                }
                self.dragging = false;
                self.last_pointer_pos = None;
            }
        });

        events
    }

    /// Commands triggered by keyboard shortcuts this frame.
    ///
    /// Skipped while a text field has focus so typing a color does not switch tools.
    pub fn shortcut_commands(&self, ctx: &Context) -> Vec<ToolCommand> {
        if ctx.wants_keyboard_input() {
            return Vec::new();
        }
        ctx.input_mut(|input| {
            shortcuts()
                .into_iter()
                .filter(|(shortcut, _)| input.consume_shortcut(shortcut))
                .map(|(_, command)| command)
                .collect()
        })
    }
}
