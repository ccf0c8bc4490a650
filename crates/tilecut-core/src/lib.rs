pub mod clamp;
pub mod config;
pub mod error;
pub mod geometry;
pub mod history;
pub mod io;
pub mod labels;
pub mod navigation;
pub mod selection;
pub mod session;
pub mod source;
pub mod sync;
pub mod viewport;
