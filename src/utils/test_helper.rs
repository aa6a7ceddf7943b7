//! Helpers for asserting on captured log output in unit tests.
//!
//! **Note**: This module is only compiled during testing.
