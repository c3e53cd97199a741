pub mod app;
pub mod cmd;
