//! Trellis Core Types and Definitions
//!
//! This crate provides the foundational types of the Trellis diagram layout
//! engine. It includes:
//!
//! - **Geometry**: Points, bounds, insets and connector routes ([`geometry`] module)
//! - **Scales**: Order-to-pixel mapping and diagram grids ([`scale`] module)
//! - **Identifiers**: Model row ids and layout handles ([`identifier`] module)
//! - **Semantic**: The visible model elements of a diagram ([`semantic`] module)

pub mod geometry;
pub mod identifier;
pub mod scale;
pub mod semantic;
