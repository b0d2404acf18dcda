//! Backend for a prompt-to-image gallery
//!
//! Forwards prompts to a hosted image-generation provider, normalizes the
//! provider's output into a single image URL, and stores shared images as
//! gallery posts.

pub mod ai;
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod store;

pub use error::{Error, Result};
