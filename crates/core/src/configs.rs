//! Configuration parsing for task files

pub mod tasks;
