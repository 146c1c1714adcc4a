pub mod category;
pub mod config;
pub mod memo;

pub use category::*;
pub use config::*;
pub use memo::*;
