pub mod controller;
pub mod data;
pub mod ui;
pub mod widgets;
