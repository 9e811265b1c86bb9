pub mod config;
pub mod month;
pub mod open;
pub mod path;
pub mod preview;
pub mod year;
