//! Relation linking and cardinality classification at schema build time.

use tests::*;

use graft_core::schema::{RelationKind, Schema};
use graft_core::value::Type;

#[test]
fn has_many_classifies_one_to_many_with_many_to_one_reverse() {
    let schema = shop_schema();

    let items = schema.field(field_id(&schema, "Order", "items"));
    let relation = items.ty.expect_relation();
    assert_eq!(RelationKind::OneToMany, relation.kind);
    assert!(relation.is_collection());
    assert_eq!(
        Some(field_id(&schema, "OrderItem", "order")),
        relation.pair
    );

    let order = schema.field(field_id(&schema, "OrderItem", "order"));
    let relation = order.ty.expect_relation();
    assert_eq!(RelationKind::ManyToOne, relation.kind);
    assert!(!relation.is_collection());
    assert_eq!(Some(field_id(&schema, "Order", "items")), relation.pair);
}

#[test]
fn has_one_pair_classifies_one_to_one_on_both_ends() {
    let schema = accounts_schema();

    let profile = schema.field(field_id(&schema, "User", "profile"));
    assert_eq!(RelationKind::OneToOne, profile.ty.expect_relation().kind);

    // The belongs_to reverse is reclassified: its pair is not list-valued.
    let user = schema.field(field_id(&schema, "Profile", "user"));
    assert_eq!(RelationKind::OneToOne, user.ty.expect_relation().kind);
}

#[test]
fn many_to_many_links_both_ends() {
    let schema = blog_schema();

    let tags = schema.field(field_id(&schema, "Post", "tags"));
    let relation = tags.ty.expect_relation();
    assert_eq!(RelationKind::ManyToMany, relation.kind);
    assert_eq!(Some(field_id(&schema, "Tag", "posts")), relation.pair);

    let posts = schema.field(field_id(&schema, "Tag", "posts"));
    assert_eq!(
        Some(field_id(&schema, "Post", "tags")),
        posts.ty.expect_relation().pair
    );
}

#[test]
fn one_way_many_to_many_is_allowed() {
    let mut builder = Schema::builder();

    let post = builder.model("Post");
    post.field("id", Type::I64).primary_key();
    post.many_to_many("tags", "Tag");

    let tag = builder.model("Tag");
    tag.field("id", Type::I64).primary_key();

    let schema = assert_ok!(builder.build());
    let tags = schema.field(field_id(&schema, "Post", "tags"));
    let relation = tags.ty.expect_relation();
    assert_eq!(RelationKind::ManyToMany, relation.kind);
    assert_none!(relation.pair);
}

#[test]
fn has_many_without_belongs_to_reverse_is_an_error() {
    let mut builder = Schema::builder();

    let order = builder.model("Order");
    order.field("id", Type::I64).primary_key();
    order.has_many("items", "OrderItem");

    let item = builder.model("OrderItem");
    item.field("id", Type::I64).primary_key();

    let err = assert_err!(builder.build());
    assert!(err.is_invalid_schema());
    assert!(err
        .to_string()
        .contains("has no matching `belongs_to` relation"));
}

#[test]
fn ambiguous_reverse_is_an_error() {
    let mut builder = Schema::builder();

    let order = builder.model("Order");
    order.field("id", Type::I64).primary_key();
    order.has_many("items", "OrderItem");

    let item = builder.model("OrderItem");
    item.field("id", Type::I64).primary_key();
    item.belongs_to("order", "Order");
    item.belongs_to("original_order", "Order");

    let err = assert_err!(builder.build());
    assert!(err.is_invalid_schema());
    assert!(err.to_string().contains("more than one `belongs_to`"));
}

#[test]
fn unregistered_relation_target_is_an_error() {
    let mut builder = Schema::builder();

    let order = builder.model("Order");
    order.field("id", Type::I64).primary_key();
    order.has_many("items", "OrderItem");

    let err = assert_err!(builder.build());
    assert!(err.is_invalid_schema());
    assert!(err.to_string().contains("was not registered"));
}

#[test]
fn model_without_primary_key_is_an_error() {
    let mut builder = Schema::builder();
    builder.model("Order").field("note", Type::String);

    let err = assert_err!(builder.build());
    assert!(err.is_invalid_schema());
    assert!(err.to_string().contains("has no primary key"));
}

#[test]
fn composite_primary_key_is_declared_in_order() {
    let schema = transit_schema();
    let leg = schema.model_by_name("Leg").unwrap();

    let names: Vec<_> = leg.primary_key_fields().map(|field| field.name()).collect();
    assert_eq!(vec!["region", "number"], names);
}
