//! Tests for the media service

#[cfg(test)]
mod service_tests;
