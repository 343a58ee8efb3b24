//! IDE layer tests
//!
//! Tests for:
//! - Visible elements (shadowing, hiding, overriding, static contexts)
//! - Static imports
//! - Assignability filtering
//! - Enclosing element
//! - Handle projection and collaborators

pub mod tests_visible_elements;
