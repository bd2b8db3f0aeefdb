pub mod intake_handler;

pub use intake_handler::*;
