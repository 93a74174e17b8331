//! Rendering of gather results

pub mod console;
pub mod formatter;
