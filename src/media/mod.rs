pub mod player;
pub mod thumbnail;
