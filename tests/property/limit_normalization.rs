// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Limit Normalization and Change Detection
//!
//! Whatever representation CloudStack uses for a limit, the change detector
//! must only ever see the integer behind it.

use proptest::prelude::*;
use serde_json::{json, Value};

use cloudstack_resource_limit::api::commands::ResourceLimitRecord;
use cloudstack_resource_limit::domain::{normalize_limit, Limit, ResolvedScope, ResourceType};
use cloudstack_resource_limit::service::has_changed;
use cloudstack_resource_limit::service::limits::update_request;

/// Valid limits: -1 or any non-negative value
fn limit_value() -> impl Strategy<Value = i64> {
    prop_oneof![Just(-1i64), 0i64..=i64::from(u32::MAX)]
}

/// Every wire representation of `n`
fn representation(n: i64) -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(json!(n)),
        Just(json!(n.to_string())),
        Just(json!({ "max": n })),
        Just(json!({ "limit": n.to_string() })),
    ]
}

fn record_with(max: Value) -> ResourceLimitRecord {
    serde_json::from_value(json!({ "resourcetype": "0", "max": max }))
        .expect("fixture record must deserialize")
}

proptest! {
    #[test]
    fn prop_every_representation_normalizes_to_the_same_integer(
        (n, repr) in limit_value().prop_flat_map(|n| (Just(n), representation(n)))
    ) {
        prop_assert_eq!(normalize_limit(&repr), Ok(n));
        prop_assert_eq!(record_with(repr).max, n);
    }

    #[test]
    fn prop_change_detected_iff_values_differ(
        desired in limit_value(),
        (current, repr) in limit_value().prop_flat_map(|n| (Just(n), representation(n)))
    ) {
        let request = update_request(
            &ResolvedScope::default(),
            ResourceType::Instance,
            Limit::new(desired).expect("strategy yields valid limits"),
        );
        prop_assert_eq!(has_changed(&request, &record_with(repr)), desired != current);
    }

    #[test]
    fn prop_negative_limits_other_than_unlimited_are_rejected(n in i64::MIN..-1) {
        prop_assert!(Limit::new(n).is_err());
    }
}
