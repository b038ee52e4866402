//! Unit and behaviour tests for archive extraction.

mod support;
