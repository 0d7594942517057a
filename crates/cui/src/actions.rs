use crate::app::App;
use crate::input::InputAction;

pub fn dispatch(app: &mut App, action: InputAction) {
    match action {
        InputAction::None => {}
        InputAction::Quit => app.should_quit = true,
        InputAction::ToggleHelp => app.show_help = !app.show_help,
        InputAction::NextFocus => app.cycle_focus(true),
        InputAction::PrevFocus => app.cycle_focus(false),
        InputAction::MoveUp => app.move_cursor(0, -1),
        InputAction::MoveDown => app.move_cursor(0, 1),
        InputAction::MoveLeft => app.move_cursor(-1, 0),
        InputAction::MoveRight => app.move_cursor(1, 0),
        InputAction::ToggleCell => app.toggle_at_cursor(),
        InputAction::ClearSlip => {
            if app.show_help {
                app.show_help = false;
            } else {
                app.clear_slip();
            }
        }
        InputAction::Activate => app.activate_primary(),
        InputAction::RandomFill => app.randomize_slip(),
        InputAction::SubmitEntry => app.open_name_prompt(),
        InputAction::GeneratePlayers => app.open_generate_prompt(),
        InputAction::DeletePlayers => app.delete_players(),
        InputAction::RunDraw => app.run_draw(),
        InputAction::SetPrize => app.open_prize_prompt(),
        InputAction::RefreshLobby => app.refresh_lobby(),
    }
}
