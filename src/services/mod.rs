// Service module exports

pub mod layout;
pub mod mutation;
pub mod reschedule;
pub mod settings;
pub mod snapshot;
