// Rust Planner Library
// Calendar layout engine: day, week and month placement plus drag-reschedule

pub mod models;
pub mod services;
pub mod utils;
