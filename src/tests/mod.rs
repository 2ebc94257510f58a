//! Test modules for the prefix tree crate.
//!
//! This module contains the crate-internal test suites:
//! - Scenario and property-based tests for the tree and its cursors
//! - Tests for the keyed map overlay
//! - Configuration loading and validation tests
//! - Shared strategies and fixtures
