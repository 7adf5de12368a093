pub mod app;
pub mod input;
pub mod logging;
pub mod settings;
