pub mod api;
pub mod combat;
pub mod content;
pub mod error;
pub mod fighter;
pub mod grid;
pub mod movement;
pub mod placement;
pub mod report;
pub mod simulation;
pub mod targeting;

pub use combat::Action;
pub use error::SimError;
pub use fighter::{Fighter, Role, RosterUnit, Side};
pub use grid::{distance, Board, Occupancy, Position};
pub use placement::{auto_place, Placement, PlacementEntry};
pub use report::{CombatReport, Round, UnitSnapshot};
pub use simulation::{simulate, simulate_with_rules, Outcome, Rules, Team};
