use eframe_sketch::{
    EditorContext, GestureState, InputEvent, Mode, SketchConfig, Style, ToolCommand,
};
use egui::{Color32, Pos2, pos2};

fn editor() -> EditorContext {
    let config = SketchConfig {
        style: Style::new(Color32::BLACK, 2.0),
        ..SketchConfig::with_size(80, 80)
    };
    EditorContext::new(&config)
}

fn down(position: Pos2) -> InputEvent {
    InputEvent::PointerDown {
        position,
        modifier: false,
    }
}

fn drag(position: Pos2, modifier: bool) -> InputEvent {
    InputEvent::PointerMove { position, modifier }
}

fn up(position: Pos2, modifier: bool) -> InputEvent {
    InputEvent::PointerUp { position, modifier }
}

fn pixel(editor: &EditorContext, x: u32, y: u32) -> Color32 {
    editor.surface().pixel(x, y).unwrap()
}

#[test]
fn test_mode_switch_mid_gesture_discards_preview() {
    let mut editor = editor();
    let blank = editor.surface().snapshot();

    editor.execute(ToolCommand::SelectCircle).unwrap();
    editor.handle_input(&down(pos2(40.0, 40.0)));
    editor.handle_input(&drag(pos2(60.0, 40.0), false));
    assert!(!editor.surface().matches(&blank));

    editor.execute(ToolCommand::SelectRectangle).unwrap();
    assert!(editor.surface().matches(&blank));
    assert!(matches!(editor.tools().gesture(), GestureState::Idle));
    assert_eq!(editor.mode(), Mode::Rectangle);
    assert!(!editor.history().can_undo());

    // A stray release from the abandoned gesture does nothing
    editor.handle_input(&up(pos2(60.0, 40.0), false));
    assert!(editor.surface().matches(&blank));
    assert!(!editor.history().can_undo());

    // The next gesture starts clean in the new mode
    editor.handle_input(&down(pos2(10.0, 10.0)));
    match editor.tools().gesture() {
        GestureState::ShapeDrawing { origin, mode, .. } => {
            assert_eq!(*origin, pos2(10.0, 10.0));
            assert_eq!(*mode, Mode::Rectangle);
        }
        other => panic!("unexpected gesture {other:?}"),
    }
    editor.handle_input(&drag(pos2(30.0, 30.0), false));
    editor.handle_input(&up(pos2(30.0, 30.0), false));
    assert_eq!(editor.history().len(), 1);
    assert_eq!(pixel(&editor, 20, 10), Color32::BLACK);
    assert_eq!(pixel(&editor, 20, 20), Color32::WHITE);
}

#[test]
fn test_mode_switch_mid_freehand_discards_stroke() {
    let mut editor = editor();
    let blank = editor.surface().snapshot();
    editor.handle_input(&down(pos2(5.0, 5.0)));
    editor.handle_input(&drag(pos2(70.0, 70.0), false));
    editor.execute(ToolCommand::SelectLine).unwrap();
    assert!(editor.surface().matches(&blank));
    assert!(!editor.tools().is_active());
}

#[test]
fn test_freehand_stroke_commits_on_release() {
    let mut editor = editor();
    editor.handle_input(&down(pos2(10.0, 10.0)));
    editor.handle_input(&drag(pos2(20.0, 10.0), false));
    editor.handle_input(&drag(pos2(20.0, 30.0), false));
    assert!(!editor.history().can_undo());
    editor.handle_input(&up(pos2(20.0, 30.0), false));

    assert_eq!(editor.history().len(), 1);
    assert_eq!(pixel(&editor, 15, 10), Color32::BLACK);
    assert_eq!(pixel(&editor, 20, 25), Color32::BLACK);
    assert_eq!(pixel(&editor, 40, 40), Color32::WHITE);
}

#[test]
fn test_shift_snaps_line_preview_and_commit() {
    let mut editor = editor();
    editor.execute(ToolCommand::SelectLine).unwrap();
    editor.handle_input(&down(pos2(10.5, 10.5)));
    editor.handle_input(&drag(pos2(60.5, 15.5), true));
    // Preview is horizontal even though the pointer is below the origin row
    assert_eq!(pixel(&editor, 60, 10), Color32::BLACK);
    assert_eq!(pixel(&editor, 60, 15), Color32::WHITE);

    editor.handle_input(&up(pos2(15.5, 60.5), true));
    // Released with a mostly vertical delta: final line is vertical
    assert_eq!(pixel(&editor, 10, 60), Color32::BLACK);
    assert_eq!(pixel(&editor, 60, 10), Color32::WHITE);
    assert_eq!(editor.history().len(), 1);
}

#[test]
fn test_circle_is_rendered_at_release_point() {
    let mut editor = editor();
    editor.execute(ToolCommand::SelectCircle).unwrap();
    editor.handle_input(&down(pos2(40.0, 40.0)));
    editor.handle_input(&drag(pos2(45.0, 40.0), false));
    // Released further out than the last move
    editor.handle_input(&up(pos2(60.0, 40.0), false));

    assert_eq!(pixel(&editor, 59, 39), Color32::BLACK);
    assert_eq!(pixel(&editor, 44, 39), Color32::WHITE);
}

#[test]
fn test_shape_preview_redraws_from_committed_state() {
    let mut editor = editor();
    // Something committed underneath
    editor.handle_input(&down(pos2(0.0, 70.0)));
    editor.handle_input(&drag(pos2(80.0, 70.0), false));
    editor.handle_input(&up(pos2(80.0, 70.0), false));
    let committed = editor.surface().snapshot();

    editor.execute(ToolCommand::SelectTriangle).unwrap();
    editor.handle_input(&down(pos2(10.0, 10.0)));
    for x in [20.0, 40.0, 60.0, 30.0] {
        editor.handle_input(&drag(pos2(x, 10.0), false));
    }
    editor.handle_input(&up(pos2(30.0, 10.0), false));

    // Edge from x=10 to x=30 only; earlier, longer previews left no trace
    assert_eq!(pixel(&editor, 25, 9), Color32::BLACK);
    assert_eq!(pixel(&editor, 50, 10), Color32::WHITE);
    // The committed stroke underneath survives
    assert_eq!(pixel(&editor, 40, 70), Color32::BLACK);
    assert_eq!(editor.history().len(), 2);

    editor.undo();
    assert!(editor.surface().matches(&committed));
}

#[test]
fn test_eraser_uses_background_and_commits() {
    let mut editor = editor();
    editor.handle_input(&down(pos2(0.0, 40.0)));
    editor.handle_input(&drag(pos2(80.0, 40.0), false));
    editor.handle_input(&up(pos2(80.0, 40.0), false));

    editor.execute(ToolCommand::SetLineWidth(10.0)).unwrap();
    editor.execute(ToolCommand::SelectEraser).unwrap();
    editor.handle_input(&down(pos2(40.0, 20.0)));
    editor.handle_input(&drag(pos2(40.0, 60.0), false));
    editor.handle_input(&up(pos2(40.0, 60.0), false));

    assert_eq!(pixel(&editor, 40, 40), Color32::WHITE);
    assert_eq!(pixel(&editor, 10, 40), Color32::BLACK);
    assert_eq!(editor.history().len(), 2);
    // The eraser did not change the drawing color
    assert_eq!(editor.style().stroke_color, Color32::BLACK);
}

#[test]
fn test_style_commands_validate_input() {
    let mut editor = editor();
    editor.execute(ToolCommand::SetColor("#ff0000".to_owned())).unwrap();
    assert_eq!(editor.style().stroke_color, Color32::from_rgb(255, 0, 0));

    assert!(editor.execute(ToolCommand::SetColor("not a color".to_owned())).is_err());
    assert!(editor.execute(ToolCommand::SetLineWidth(-1.0)).is_err());
    assert_eq!(editor.style().stroke_color, Color32::from_rgb(255, 0, 0));
    assert_eq!(editor.style().line_width, 2.0);
}

#[test]
fn test_toggle_eraser_command() {
    let mut editor = editor();
    editor.execute(ToolCommand::SelectTriangle).unwrap();
    editor.execute(ToolCommand::ToggleEraser).unwrap();
    assert_eq!(editor.mode(), Mode::Eraser);
    editor.execute(ToolCommand::ToggleEraser).unwrap();
    assert_eq!(editor.mode(), Mode::Triangle);
}

#[test]
fn test_click_in_any_mode_leaves_canvas_and_history_untouched() {
    let selects = [
        ToolCommand::SelectFree,
        ToolCommand::SelectLine,
        ToolCommand::SelectRectangle,
        ToolCommand::SelectCircle,
        ToolCommand::SelectTriangle,
    ];
    for select in selects {
        let mut editor = editor();
        let blank = editor.surface().snapshot();
        editor.execute(select).unwrap();

        editor.handle_input(&down(pos2(20.0, 20.0)));
        editor.handle_input(&up(pos2(20.0, 20.0), false));

        assert_eq!(editor.history().len(), 0, "{:?}", editor.mode());
        assert!(editor.surface().matches(&blank), "{:?}", editor.mode());
        assert!(!editor.tools().is_active());
    }
}

#[test]
fn test_shape_dragged_back_to_origin_commits_nothing() {
    let mut editor = editor();
    let blank = editor.surface().snapshot();
    editor.execute(ToolCommand::SelectRectangle).unwrap();

    editor.handle_input(&down(pos2(20.0, 20.0)));
    editor.handle_input(&drag(pos2(50.0, 50.0), false));
    editor.handle_input(&up(pos2(20.0, 20.0), false));

    assert_eq!(editor.history().len(), 0);
    assert!(editor.surface().matches(&blank));
}
