//! Unit tests for the CLI runtime.

mod support;
