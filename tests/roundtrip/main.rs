//! Integration tests for level persistence.

mod serialization;
