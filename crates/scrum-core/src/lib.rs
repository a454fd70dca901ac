//! # scrum-core
//!
//! Core types and error types for scrumkit.
//!
//! This crate provides the foundational types shared across all scrumkit crates:
//! - Entity structs for users, projects, sprints, retrospectives, and tasks
//! - Task variants and the per-strategy task records
//! - Status, priority, and severity enums with their SQL/CSV spellings
//! - Identifier-based equality for stored entities
//! - Cross-cutting error types and field validation

pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod validate;
