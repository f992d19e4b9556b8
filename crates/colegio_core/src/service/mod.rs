//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository and report calls into use-case level APIs.
//! - Keep web and GraphQL layers decoupled from storage details.

pub mod school_service;
