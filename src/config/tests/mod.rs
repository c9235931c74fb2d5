//! Unit tests for podshim configuration types.
//!
//! - [`helpers`] - Shared fixtures and helper functions
//! - [`types_tests`] - Defaults and TOML deserialisation
//! - [`layer_precedence_tests`] - `MergeComposer` layer precedence tests

mod helpers;
