//! Tests for the listing lifecycle and search services

#[cfg(test)]
mod mocks;
