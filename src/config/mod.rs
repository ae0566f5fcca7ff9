pub mod edgedns;
pub mod error;
pub mod models;
pub mod names;
pub mod resolver;
pub mod source;
pub mod validator;

pub use error::{ConfigError, Violation};
pub use models::{Config, EdgeDnsType, Infoblox, LogConfig, LogFormat, LogLevel, Override};
pub use resolver::{resolve, DependencyResolver};
pub use source::{EnvSource, MapSource, SettingsSource};
