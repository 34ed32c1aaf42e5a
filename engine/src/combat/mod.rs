pub mod actions;
pub mod damage;
pub mod turn;

pub use actions::Action;
pub use damage::scaled_damage;
pub use turn::{run_side_turn, TurnContext};
