// src/lib.rs
//! Capture quotes and commentary as a list of highlight sections, then export
//! them as Markdown drafts, HTML form fragments, JSON or Hugo posts.

pub mod config;
pub mod draft;
pub mod editor;
pub mod error;
pub mod library;
pub mod logging;
pub mod render;
pub mod tui;

pub use error::{Error, Result};
