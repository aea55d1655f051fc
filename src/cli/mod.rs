//! CLI operation mode handlers.
//!
//! This module contains the implementations for the operation modes:
//! - [`migrations`]: Database schema migrations
//! - [`rating_tui`]: Interactive rating panel

pub mod migrations;
pub mod rating_tui;
