//! Internal test modules - whitebox tests with crate access
//!
//! Harness-based acceptance tests drive `TuiApp` through terminal events
//! against a `TestBackend`, a manual clock and an in-memory device.


mod acceptance_layout;
