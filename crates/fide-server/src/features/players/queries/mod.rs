pub mod get;

pub use get::{get_player, GetPlayerError, GetPlayerQuery};
