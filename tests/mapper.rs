use atomspace_rest::AtomSpaceError;
use atomspace_rest::construct::{Atom, AtomType, AttentionValue, TruthValue};
use atomspace_rest::mapper::{
    AttentionValueRequest, TruthValueRequest, UpdateAtomRequest, marshal, parse_attention_value,
    parse_truth_value,
};
use serde_json::json;

fn truth_value(value: serde_json::Value) -> TruthValueRequest {
    serde_json::from_value(value).expect("well-formed truth value")
}

#[test]
fn marshal_uses_the_fixed_field_set() {
    let atom = Atom::new(
        6,
        AtomType::InheritanceLink,
        String::new(),
        vec![2, 1],
        vec![],
        TruthValue::new(0.5, 0.4),
        AttentionValue::new(0, 0, false),
    );
    let json = serde_json::to_value(marshal(&atom)).unwrap();
    let mut keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec!["attentionvalue", "handle", "incoming", "name", "outgoing", "truthvalue", "type"]
    );
    assert_eq!(json["outgoing"], json!([2, 1]));
    assert_eq!(json["truthvalue"]["details"]["confidence"], TruthValue::new(0.5, 0.4).confidence());
}

#[test]
fn simple_truth_value_parses() {
    let request =
        truth_value(json!({"type": "simple", "details": {"strength": 0.25, "count": 10}}));
    assert_eq!(parse_truth_value(&request).unwrap(), TruthValue::new(0.25, 10.0));
}

#[test]
fn truth_value_requires_a_type() {
    let result: Result<TruthValueRequest, _> =
        serde_json::from_value(json!({"details": {"strength": 0.25, "count": 10}}));
    assert!(result.is_err());
}

#[test]
fn out_of_range_truth_values_are_rejected() {
    for (strength, count) in [(-0.1, 1.0), (1.01, 1.0), (0.5, -2.0)] {
        let request = truth_value(json!({
            "type": "simple",
            "details": {"strength": strength, "count": count}
        }));
        let err = parse_truth_value(&request).unwrap_err();
        assert!(
            matches!(err, AtomSpaceError::BadRequest(_)),
            "{strength}/{count} should be rejected"
        );
    }
}

#[test]
fn attention_value_components_are_optional() {
    let request: AttentionValueRequest = serde_json::from_value(json!({"lti": 4})).unwrap();
    assert_eq!(parse_attention_value(&request), (None, Some(4), None));
    let request: AttentionValueRequest =
        serde_json::from_value(json!({"sti": -1, "lti": 2, "vlti": true})).unwrap();
    assert_eq!(parse_attention_value(&request), (Some(-1), Some(2), Some(true)));
}

#[test]
fn attention_value_outside_short_range_is_rejected() {
    let result: Result<AttentionValueRequest, _> = serde_json::from_value(json!({"sti": 40000}));
    assert!(result.is_err());
}

#[test]
fn update_body_fields_are_both_optional() {
    let request: UpdateAtomRequest = serde_json::from_value(json!({})).unwrap();
    assert_eq!(request, UpdateAtomRequest::default());
}
