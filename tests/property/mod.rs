// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! Laws of occurrence, delivery order and the combinators.

mod combinator_laws;
mod occurrence;
