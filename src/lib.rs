pub mod config;
pub mod logging;
pub mod utils;

pub use config::{resolve, Config, ConfigError, DependencyResolver, EdgeDnsType};

#[cfg(test)]
mod tests;
