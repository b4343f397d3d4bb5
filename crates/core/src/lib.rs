pub mod content;
pub mod game;
pub mod journal;
pub mod ledger;
pub mod replay;
pub mod state;
pub mod types;

pub use content::TierConfig;
pub use game::Game;
pub use game::occupancy::{CellState, Occupancy};
pub use game::pathfinding::{accessible_area, find_path};
pub use game::policy::choose_move;
pub use journal::{InputJournal, InputPayload, InputRecord};
pub use ledger::{MemoryLedger, ScoreLedger};
pub use replay::*;
pub use state::{Arena, ControlReversal, Hazard, Item, Life, Snake};
pub use types::*;
