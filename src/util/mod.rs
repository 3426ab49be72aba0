//! Utility functions for the Packsmith project.

pub mod settings;
