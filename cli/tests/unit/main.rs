//! Unit tests for infracheck
//!
//! These tests use mocked dependencies and run fast without external I/O.

mod helpers;
