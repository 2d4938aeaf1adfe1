//! `assetd` - equipment asset intake service
//!
//! A small HTTP service that accepts asset records as JSON and appends them
//! to an `Assets` table with a single parameterized insert, plus the intake
//! form whose "sold to" field follows the placement select.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod api;
pub mod asset;
pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod locale;
pub mod logging;
pub mod storage;

pub use api::{router, AppState};
pub use asset::NewAsset;
pub use config::Config;
pub use error::{Error, Result};
pub use form::sold_to_visible;
pub use locale::Locale;
pub use logging::init_logging;
pub use storage::{ConnectionSettings, Storage};
