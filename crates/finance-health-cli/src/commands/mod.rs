pub mod analysis;
pub mod interactive;
