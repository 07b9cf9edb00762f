//! Eventflow Core Types and Definitions
//!
//! This crate provides the foundational vocabulary shared by the eventflow
//! layout engine and its exporters. It includes:
//!
//! - **Identifiers**: Kind-prefixed node and edge identifiers ([`identifier::NodeId`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Base visual styles for nodes and edges ([`draw`] module)
//! - **Semantic**: Input records describing commands, events, and policies ([`semantic`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod identifier;
pub mod semantic;
