pub use std_util::*;

use graft::{ObjectId, Session};
use graft_core::{
    schema::{FieldId, ModelId, Schema},
    value::Type,
    Value,
};
use std::sync::Arc;

/// An `Order` has many `OrderItem` rows; an item belongs to its order.
pub fn shop_schema() -> Arc<Schema> {
    let mut builder = Schema::builder();

    let order = builder.model("Order");
    order.field("id", Type::I64).primary_key();
    order.field("note", Type::String).nullable();
    order.has_many("items", "OrderItem");

    let item = builder.model("OrderItem");
    item.field("id", Type::I64).primary_key();
    item.field("qty", Type::I64);
    item.belongs_to("order", "Order");

    Arc::new(builder.build().unwrap())
}

/// A `User` has one `Profile`; nulling the link is destructive.
pub fn accounts_schema() -> Arc<Schema> {
    let mut builder = Schema::builder();

    let user = builder.model("User");
    user.field("id", Type::I64).primary_key();
    user.field("name", Type::String);
    user.has_one("profile", "Profile");

    let profile = builder.model("Profile");
    profile.field("id", Type::I64).primary_key();
    profile.field("bio", Type::String).nullable();
    profile.belongs_to("user", "User");

    Arc::new(builder.build().unwrap())
}

/// `Post` and `Tag` associate both ways.
pub fn blog_schema() -> Arc<Schema> {
    let mut builder = Schema::builder();

    let post = builder.model("Post");
    post.field("id", Type::I64).primary_key();
    post.field("title", Type::String);
    post.many_to_many("tags", "Tag");

    let tag = builder.model("Tag");
    tag.field("id", Type::I64).primary_key();
    tag.field("name", Type::String);
    tag.many_to_many("posts", "Post");

    Arc::new(builder.build().unwrap())
}

/// A `Trip` references a `Leg` by a composite (region, number) key.
pub fn transit_schema() -> Arc<Schema> {
    let mut builder = Schema::builder();

    let trip = builder.model("Trip");
    trip.field("id", Type::I64).primary_key();
    trip.belongs_to("leg", "Leg");

    let leg = builder.model("Leg");
    leg.field("region", Type::I64).primary_key();
    leg.field("number", Type::I64).primary_key();

    Arc::new(builder.build().unwrap())
}

pub fn model_id(schema: &Schema, model: &str) -> ModelId {
    schema
        .model_by_name(model)
        .unwrap_or_else(|| panic!("unknown model `{model}`"))
        .id
}

pub fn field_id(schema: &Schema, model: &str, field: &str) -> FieldId {
    schema
        .model_by_name(model)
        .unwrap_or_else(|| panic!("unknown model `{model}`"))
        .field_by_name(field)
        .unwrap_or_else(|| panic!("unknown field `{model}::{field}`"))
        .id
}

/// Insert an object and assign primitive attributes by name.
pub fn seed(session: &mut Session, model: &str, values: &[(&str, Value)]) -> ObjectId {
    let schema = session.schema().clone();
    let id = session.insert_new(model_id(&schema, model));

    for (name, value) in values {
        session
            .set_value(id, field_id(&schema, model, name), value.clone())
            .unwrap();
    }

    id
}
