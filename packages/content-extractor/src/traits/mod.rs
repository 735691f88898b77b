//! Core trait abstractions.

pub mod strategy;
