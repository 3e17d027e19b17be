// src/models/mod.rs

//! Domain models for the member viewer.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod columns;
mod config;
mod member;

// Re-export all public types
pub use columns::ColumnSchema;
pub use config::{
    AvatarConfig, Config, LoggingConfig, OrderingConfig, OrderingPolicy, ParserConfig,
    RenderConfig, RenderMode, SourceConfig, TrailingRow,
};
pub use member::{Grade, MemberName, MemberRecord, MemberStatus};
