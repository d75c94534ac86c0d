//! Tests for the MySQL user store
