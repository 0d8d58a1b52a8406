pub mod constants;
pub mod validation;
pub mod shared_wheel_game;
