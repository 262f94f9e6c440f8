//! Shared test doubles for sync engine tests.
