//! Property-based tests for request translation.
//!
//! These tests use proptest to check that the upstream body is always
//! exactly the whitelisted fields, with caller values where given and
//! provider defaults elsewhere.

use chat_relay_proxy::services::ProviderKind;
use chat_relay_proxy::transformer::{translate_chat_request, WHITELISTED_FIELDS};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

/// Arbitrary JSON leaf values
fn leaf_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        (0.0f64..2.0).prop_map(|f| json!(f)),
        "[a-z0-9/ .-]{0,16}".prop_map(Value::String),
    ]
}

/// Arbitrary JSON values up to a small depth
fn value_strategy() -> impl Strategy<Value = Value> {
    leaf_strategy().prop_recursive(2, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::hash_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// Inbound bodies: any subset of the whitelist plus arbitrary extra fields
fn body_strategy() -> impl Strategy<Value = Map<String, Value>> {
    (
        prop::collection::vec(prop::option::of(value_strategy()), 6),
        prop::collection::hash_map("[a-z_]{1,12}", value_strategy(), 0..6),
    )
        .prop_map(|(known, extra)| {
            let mut body: Map<String, Value> = extra.into_iter().collect();
            for (field, value) in WHITELISTED_FIELDS.iter().zip(known) {
                match value {
                    Some(v) => {
                        body.insert(field.to_string(), v);
                    }
                    None => {
                        body.remove(*field);
                    }
                }
            }
            body
        })
}

fn kind_strategy() -> impl Strategy<Value = ProviderKind> {
    prop_oneof![Just(ProviderKind::DeepSeek), Just(ProviderKind::Nim)]
}

proptest! {
    /// Property: the outbound body has exactly the whitelisted keys
    #[test]
    fn prop_outbound_keys_are_whitelist(body in body_strategy(), kind in kind_strategy()) {
        let out = translate_chat_request(&Value::Object(body), &kind.profile().defaults).unwrap();
        let value = serde_json::to_value(&out).unwrap();
        let obj = value.as_object().unwrap();

        prop_assert_eq!(obj.len(), WHITELISTED_FIELDS.len());
        for field in WHITELISTED_FIELDS {
            prop_assert!(obj.contains_key(field));
        }
    }

    /// Property: present fields are forwarded unchanged, absent ones get defaults
    #[test]
    fn prop_values_are_caller_or_default(body in body_strategy(), kind in kind_strategy()) {
        let defaults = &kind.profile().defaults;
        let out = translate_chat_request(&Value::Object(body.clone()), defaults).unwrap();
        let value = serde_json::to_value(&out).unwrap();

        let expected_defaults = json!({
            "model": defaults.model,
            "messages": [],
            "temperature": defaults.temperature,
            "top_p": defaults.top_p,
            "max_tokens": defaults.max_tokens,
            "stream": defaults.stream,
        });

        for field in WHITELISTED_FIELDS {
            let expected = body.get(field).unwrap_or(&expected_defaults[field]);
            prop_assert_eq!(&value[field], expected);
        }
    }

    /// Property: a body without `stream` is never treated as streaming
    #[test]
    fn prop_missing_stream_is_buffered(mut body in body_strategy(), kind in kind_strategy()) {
        body.remove("stream");
        let out = translate_chat_request(&Value::Object(body), &kind.profile().defaults).unwrap();
        prop_assert!(!out.is_stream());
        prop_assert_eq!(out.stream, Value::Bool(false));
    }

    /// Property: non-object bodies are rejected rather than guessed at
    #[test]
    fn prop_non_object_rejected(leaf in leaf_strategy(), kind in kind_strategy()) {
        prop_assert!(translate_chat_request(&leaf, &kind.profile().defaults).is_err());
    }
}
