//! Configuration layering and validation tests
