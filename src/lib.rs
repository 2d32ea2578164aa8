//! Typed, validated access to environment variables.
//!
//! ```rust
//! use env_var::{env, InMemoryEnv};
//!
//! let source: InMemoryEnv = [("PORT", "8080"), ("ALLOWED", "a,b")].into_iter().collect();
//!
//! let port = env("PORT").as_port_number().required_from(&source).unwrap();
//! let allowed = env("ALLOWED").as_string_list().required_from(&source).unwrap();
//! let debug = env("DEBUG").as_bool().default(false).required_from(&source).unwrap();
//! let proxy = env("PROXY").as_url().optional_from(&source).unwrap();
//!
//! assert_eq!(port, 8080);
//! assert_eq!(allowed, ["a", "b"]);
//! assert!(!debug);
//! assert_eq!(proxy, None);
//! ```

pub mod builder;
pub mod error;
pub mod resolver;
pub mod source;
pub mod transformers;

// Re-export main types
pub use builder::{env, Env};
pub use error::{format_env_errors, ConfigurationError, EnvVarError, ValidationError};
pub use resolver::Resolver;
pub use source::{InMemoryEnv, ReadEnv, SystemEnv};
pub use transformers::{
    date::IsoDuration,
    network::{Fqdn, IpInterface, IpNetwork},
    numeric::{FloatOptions, IntOptions, NumericOptions},
    Transformer,
};
