// src/lib.rs
// annotext - client data-access and synchronization layer for the
// annotext text/tag annotation service

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod session;
pub mod store;
pub mod tags;

pub use api::ApiClient;
pub use config::Config;
pub use error::{ApiError, Result};
pub use model::{FilterCriteria, Tag, TextId, TextRecord};
pub use session::Session;
pub use store::{SessionStore, Slot};
