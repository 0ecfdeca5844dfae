pub mod config;
pub mod worker;

pub use config::RunConfig;
pub use worker::{Consumer, Producer};
