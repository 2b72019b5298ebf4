//! Meta-package re-exporting all libraries of the c55 workspace.

pub use c55_core as core;
