pub mod game_snapshot;
