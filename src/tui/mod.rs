pub mod app;
pub mod detail;
pub mod input;
pub mod listeners;
pub mod markdown;
pub mod render;
pub mod theme;

#[cfg(test)]
pub mod test_helpers;

pub use app::run;
