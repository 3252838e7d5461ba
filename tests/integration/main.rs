//! Integration tests against throwaway data directories

mod circulation_tests;
mod common;
