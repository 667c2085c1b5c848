use bevy::prelude::*;

/// `Running` moves to `Stopped` once, on a quit signal. `Stopped` is terminal.
#[derive(States, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    #[default]
    Running,
    Stopped,
}

/// Set when the game stops on an error instead of a quit signal.
#[derive(Resource, Debug, Default)]
pub struct Failed(pub bool);

pub fn plugin(app: &mut App) {
    app.init_state::<GameState>().init_resource::<Failed>();
}

/// Stops the game with an error exit, through the same teardown as a quit.
pub fn fail(failed: &mut Failed, next_state: &mut NextState<GameState>) {
    failed.0 = true;
    next_state.set(GameState::Stopped);
}

/// True while running, and on the frame the quit signal lands so that frame
/// still completes its update and draw.
pub fn game_running(state: Res<State<GameState>>) -> bool {
    *state.get() == GameState::Running || state.is_changed()
}
