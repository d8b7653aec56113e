pub mod delivery;
pub mod file_size;
pub mod service;
pub mod types;
pub mod writers;
