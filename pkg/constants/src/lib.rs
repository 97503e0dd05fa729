//! Centralized constants for the certaudit project.
//!
//! All project-wide constant values live here.
//! Change a value in one place and it applies everywhere.

pub mod audit;
pub mod kube;
pub mod paths;
pub mod release;
