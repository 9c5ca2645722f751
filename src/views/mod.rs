//! Views - Text Rendering of Each Screen

pub mod dashboard;
