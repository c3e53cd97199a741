pub mod overlay;
pub mod video;
