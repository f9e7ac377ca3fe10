//! Integration tests for tracktable.
//!
//! These drive a TableController through user-level workflows that span
//! several components.

mod search_debounce_tests;
