//! Edge case tests for loxc-par
