pub mod error;
pub mod loader;
pub mod parser;
pub mod schema;
pub mod templates;

pub use error::{ConfigError, ConfigResult};
pub use loader::{load_config, load_config_from_file, load_raw, parse_config, LoadedConfig};
pub use parser::{parse_str, RawConfig, RawEntry, RawValue};
pub use schema::{keys, Check, CheckSpec, ProtectedFiles, VerifyLoopConfig};
pub use templates::{available_languages, template_for};
