//! Database library providing the MongoDB connector used by the coffee-shops API.
//!
//! Connection settings come from [`mongodb::MongoConfig`], which can be built
//! manually or loaded from environment variables via `core_config::FromEnv`.
//! Startup connections go through the retry helpers in [`common`] so transient
//! network failures during boot do not kill the process.
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{self, MongoConfig};
//! use core_config::FromEnv;
//!
//! let config = MongoConfig::from_env()?;
//! let client = mongodb::connect_from_config_with_retry(&config, None).await?;
//! let db = client.database(config.database());
//! ```

pub mod common;
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult};
