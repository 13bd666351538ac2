//! Library components for the syllabus CLI.

pub mod logging;
pub mod settings;
pub mod summary;
pub mod workspace;
