//! Core use-case services.
//!
//! # Responsibility
//! - Run one user action per call against the versioned catalog.
//! - Keep CLI/UI layers decoupled from history, filtering and storage.

pub mod catalog_service;
