//! Integration tests for defpatch

mod apply_git;
mod config_integration;
mod test_utils;
