// Module exports for models

pub mod entity;
pub mod layout;
pub mod settings;
pub mod ui;
