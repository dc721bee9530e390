//! Merging payload mappings into a single object.

use tests::*;

use graft::{from_dict, MergeOptions, Op, Session, UnknownKeys};
use graft_core::Value;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn primary_key_fields_never_change_identity() {
    let schema = shop_schema();
    let mut session = Session::new(schema.clone());
    let order = seed(
        &mut session,
        "Order",
        &[("id", 10.into()), ("note", "first".into())],
    );

    let payload = json!({ "id": 99, "note": "updated" });
    assert_ok!(from_dict(
        &mut session,
        order,
        payload.as_object().unwrap(),
        &MergeOptions::default(),
    ));

    let id = session.value(order, field_id(&schema, "Order", "id")).unwrap();
    assert_eq!(Value::I64(10), *id);

    let note = session
        .value(order, field_id(&schema, "Order", "note"))
        .unwrap();
    assert_eq!(Value::String("updated".into()), *note);
}

#[test]
fn unknown_keys_are_discarded_by_default() {
    let schema = shop_schema();
    let mut session = Session::new(schema.clone());
    let order = seed(&mut session, "Order", &[("id", 10.into())]);

    // A captcha widget's keys ride along in the same form payload.
    let payload = json!({ "captcha": { "answer": "blue" }, "csrf_token": "abc" });
    assert_ok!(from_dict(
        &mut session,
        order,
        payload.as_object().unwrap(),
        &MergeOptions::default(),
    ));
}

#[test]
fn unknown_keys_can_be_rejected() {
    let schema = shop_schema();
    let mut session = Session::new(schema.clone());
    let order = seed(&mut session, "Order", &[("id", 10.into())]);

    let options = MergeOptions {
        unknown_keys: UnknownKeys::Reject,
        ..MergeOptions::default()
    };

    let payload = json!({ "captcha": { "answer": "blue" } });
    let err = assert_err!(from_dict(
        &mut session,
        order,
        payload.as_object().unwrap(),
        &options,
    ));
    assert!(err.is_unknown_field());
    assert_eq!(
        "unknown field `Order::captcha` in payload",
        err.to_string()
    );
}

#[test]
fn nested_object_creates_missing_related_instance() {
    let schema = accounts_schema();
    let mut session = Session::new(schema.clone());
    let user = seed(&mut session, "User", &[("id", 1.into())]);

    let payload = json!({ "profile": { "bio": "hello" } });
    assert_ok!(from_dict(
        &mut session,
        user,
        payload.as_object().unwrap(),
        &MergeOptions::default(),
    ));

    let profile_field = field_id(&schema, "User", "profile");
    let profile = assert_some!(session.one(user, profile_field).unwrap());
    assert!(session.ops().contains(&Op::Insert(profile)));

    let bio = session
        .value(profile, field_id(&schema, "Profile", "bio"))
        .unwrap();
    assert_eq!(Value::String("hello".into()), *bio);
}

#[test]
fn nested_object_merges_into_existing_related_instance() {
    let schema = accounts_schema();
    let mut session = Session::new(schema.clone());
    let user = seed(&mut session, "User", &[("id", 1.into())]);
    let profile = seed(
        &mut session,
        "Profile",
        &[("id", 5.into()), ("bio", "old".into())],
    );

    let profile_field = field_id(&schema, "User", "profile");
    session.set_one(user, profile_field, Some(profile)).unwrap();

    let inserted = session.ops().len();
    let payload = json!({ "profile": { "bio": "new" } });
    assert_ok!(from_dict(
        &mut session,
        user,
        payload.as_object().unwrap(),
        &MergeOptions::default(),
    ));

    // Same instance, no new registrations.
    assert_eq!(Some(profile), session.one(user, profile_field).unwrap());
    assert_eq!(inserted, session.ops().len());

    let bio = session
        .value(profile, field_id(&schema, "Profile", "bio"))
        .unwrap();
    assert_eq!(Value::String("new".into()), *bio);
}

#[test]
fn object_payload_for_primitive_field_is_invalid() {
    let schema = shop_schema();
    let mut session = Session::new(schema.clone());
    let order = seed(&mut session, "Order", &[("id", 10.into())]);

    let payload = json!({ "note": { "nested": true } });
    let err = assert_err!(from_dict(
        &mut session,
        order,
        payload.as_object().unwrap(),
        &MergeOptions::default(),
    ));
    assert!(err.is_invalid_payload());
}

#[test]
fn scalar_type_mismatch_is_a_conversion_error() {
    let schema = shop_schema();
    let mut session = Session::new(schema.clone());
    let order = seed(&mut session, "Order", &[("id", 10.into())]);

    let payload = json!({ "note": 17, "id": 10 });
    let err = assert_err!(from_dict(
        &mut session,
        order,
        payload.as_object().unwrap(),
        &MergeOptions::default(),
    ));
    assert!(err.is_type_conversion());
}
