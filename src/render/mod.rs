//! Host-side vertex formats and the shapes drawn by the stages.

pub mod geometry;
