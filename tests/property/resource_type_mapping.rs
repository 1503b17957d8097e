// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Type Mapping Tests
//!
//! The symbolic → code mapping is fixed. These tests pin the table and check
//! that no two types share a code.

use proptest::prelude::*;
use std::collections::HashSet;
use test_case::test_case;

use cloudstack_resource_limit::domain::ResourceType;

#[test_case("instance", 0)]
#[test_case("ip_address", 1)]
#[test_case("volume", 2)]
#[test_case("snapshot", 3)]
#[test_case("template", 4)]
#[test_case("network", 6)]
#[test_case("vpc", 7)]
#[test_case("cpu", 8)]
#[test_case("memory", 9)]
#[test_case("primary_storage", 10)]
#[test_case("secondary_storage", 11)]
fn test_resource_type_code(name: &str, code: u8) {
    let resource_type: ResourceType = name.parse().unwrap();
    assert_eq!(resource_type.code(), code);
    assert_eq!(resource_type.as_str(), name);
}

#[test]
fn test_codes_are_distinct() {
    let codes: HashSet<u8> = ResourceType::ALL.iter().map(ResourceType::code).collect();
    assert_eq!(codes.len(), ResourceType::ALL.len());
}

fn any_resource_type() -> impl Strategy<Value = ResourceType> {
    prop::sample::select(ResourceType::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_distinct_types_have_distinct_codes(a in any_resource_type(), b in any_resource_type()) {
        prop_assert_eq!(a == b, a.code() == b.code());
    }

    #[test]
    fn prop_unlisted_names_are_rejected(name in "[a-z_]{1,20}") {
        let known = ResourceType::names().contains(&name.as_str());
        prop_assert_eq!(name.parse::<ResourceType>().is_ok(), known);
    }
}
