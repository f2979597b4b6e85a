//! # Base types for lanechess
//!
//! This is an auxiliary crate for `lanechess`, which contains the plain value
//! types (coordinates, offsets, teams, cells) and the pure movement geometry
//! tables. It carries no board state and no validation logic.
//!
//! Normally you don't want to use this crate directly. Use `lanechess` instead.

pub mod geometry;
pub mod types;
