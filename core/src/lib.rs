#![deny(clippy::all)]

mod error;
mod importer;
mod loader;
pub mod plugin;
pub mod plugin_driver;
mod resolver;
pub mod scanner;
mod types;
pub mod utils;

pub use error::*;
pub use importer::*;
pub use loader::*;
pub use plugin_driver::{Plugin, PluginDriver};
pub use resolver::*;
pub use types::*;
