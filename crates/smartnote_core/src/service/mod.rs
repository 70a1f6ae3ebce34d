//! Core use-case services.
//!
//! # Responsibility
//! - Own draft composition state and its manual-edit rules.
//! - Orchestrate store, filter and persistence calls into use-case level APIs.
//! - Keep presentation layers decoupled from storage details.

pub mod draft;
pub mod notes_service;
