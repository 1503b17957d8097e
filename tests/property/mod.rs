// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module

mod limit_normalization;
mod resource_type_mapping;
