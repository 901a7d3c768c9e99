//! Client for the MANGOPAY payment REST API.
//!
//! Authenticates with the OAuth2 client-credentials grant, keeps the bearer
//! token fresh, and maps requests and responses onto typed models. Start from
//! [`Mangopay`].

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod models;
pub mod services;

pub use client::Mangopay;
pub use config::{Config, ErrorHandler};
pub use error::{ApiError, Error, Result};
