use crate::app::App;
use crate::input::InputAction;

pub fn dispatch(app: &mut App, action: InputAction) {
    match action {
        InputAction::None => {}
        InputAction::Quit => app.should_quit = true,
        InputAction::ToggleHelp => app.show_help = !app.show_help,
        InputAction::CloseOverlay => app.close_overlay(),
        InputAction::NextFocus => app.cycle_focus(),
        InputAction::MoveUp => app.move_cursor(false),
        InputAction::MoveDown => app.move_cursor(true),
        InputAction::Activate => app.activate_primary(),
        InputAction::Draw => app.draw(),
        InputAction::Restart => app.restart(),
        InputAction::Grid(index) => app.select_grid(index),
        InputAction::Hand(index) => app.select_hand(index),
    }
}
