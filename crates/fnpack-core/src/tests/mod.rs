//! Unit tests for `fnpack_core`.

mod support;

mod path_tests;
