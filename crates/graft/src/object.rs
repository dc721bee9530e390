use graft_core::{
    schema::{FieldTy, Model, ModelId},
    Value,
};
use std::fmt;

/// Uniquely identifies an object within a [`Session`].
///
/// [`Session`]: crate::Session
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct ObjectId(pub(crate) usize);

/// Storage for a single field on an object, shaped by the field's type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A primitive attribute
    Value(Value),

    /// A single-valued relation link
    One(Option<ObjectId>),

    /// A collection relation's membership
    Many(Vec<ObjectId>),
}

/// A mapped object: an in-session instance of a model.
#[derive(Debug, Clone)]
pub struct Object {
    pub(crate) model: ModelId,
    pub(crate) fields: Vec<FieldValue>,
}

impl Object {
    /// Create an empty instance of the model, every field unset.
    pub fn new(model: &Model) -> Object {
        let fields = model
            .fields
            .iter()
            .map(|field| match &field.ty {
                FieldTy::Primitive(_) => FieldValue::Value(Value::Null),
                FieldTy::Relation(relation) if relation.is_collection() => {
                    FieldValue::Many(vec![])
                }
                FieldTy::Relation(_) => FieldValue::One(None),
            })
            .collect();

        Object {
            model: model.id,
            fields,
        }
    }

    pub fn model(&self) -> ModelId {
        self.model
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ObjectId({})", self.0)
    }
}
