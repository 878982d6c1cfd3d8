//! Property-based tests for the reducers and validation rules.
