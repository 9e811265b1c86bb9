//! Core library for calpro.
//!
//! - `grid` lays out month grids, ISO week numbers and the quarter picker
//! - `pattern` renders file-name patterns such as `YYYY-MM-DD`
//! - `resolver` maps a date and a `NoteKind` to a note path
//! - `materialize` opens or creates notes through a `Host`
//! - `navigation` holds the pure reducers behind the calendar views

pub mod calpro_config;
pub mod error;
pub mod grid;
pub mod host;
pub mod kind;
pub mod materialize;
pub mod navigation;
pub mod pattern;
pub mod resolver;
pub mod settings;

pub use error::{CalProError, CalProResult};
pub use host::{Entry, Host};
pub use kind::NoteKind;
pub use settings::Settings;
