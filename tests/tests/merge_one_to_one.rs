//! Null assignment semantics across relation cardinalities.

use tests::*;

use graft::{from_dict, MergeOptions, Op, Session};
use serde_json::json;

#[test]
fn nulling_one_to_one_deletes_the_related_object() {
    let schema = accounts_schema();
    let mut session = Session::new(schema.clone());
    let user = seed(&mut session, "User", &[("id", 1.into())]);
    let profile = seed(&mut session, "Profile", &[("id", 5.into())]);

    let profile_field = field_id(&schema, "User", "profile");
    session.set_one(user, profile_field, Some(profile)).unwrap();

    let payload = json!({ "profile": null });
    assert_ok!(from_dict(
        &mut session,
        user,
        payload.as_object().unwrap(),
        &MergeOptions::default(),
    ));

    assert_none!(session.one(user, profile_field).unwrap());
    assert!(!session.contains(profile));
    assert!(session.ops().contains(&Op::Delete(profile)));
}

#[test]
fn nulling_one_to_one_without_a_related_object_is_a_noop() {
    let schema = accounts_schema();
    let mut session = Session::new(schema.clone());
    let user = seed(&mut session, "User", &[("id", 1.into())]);

    let payload = json!({ "profile": null });
    assert_ok!(from_dict(
        &mut session,
        user,
        payload.as_object().unwrap(),
        &MergeOptions::default(),
    ));

    assert_none!(session
        .one(user, field_id(&schema, "User", "profile"))
        .unwrap());
    assert!(!session.ops().iter().any(|op| matches!(op, Op::Delete(_))));
}

#[test]
fn nulling_many_to_one_only_unlinks() {
    let schema = shop_schema();
    let mut session = Session::new(schema.clone());
    let order = seed(&mut session, "Order", &[("id", 10.into())]);
    let item = seed(&mut session, "OrderItem", &[("id", 1.into())]);

    let order_field = field_id(&schema, "OrderItem", "order");
    session.set_one(item, order_field, Some(order)).unwrap();

    let payload = json!({ "order": null });
    assert_ok!(from_dict(
        &mut session,
        item,
        payload.as_object().unwrap(),
        &MergeOptions::default(),
    ));

    assert_none!(session.one(item, order_field).unwrap());

    // The order row survives; only the link was cleared.
    assert!(session.contains(order));
    assert!(!session.ops().contains(&Op::Delete(order)));
}
