//! Entity metadata: models, fields, primary keys, and relation cardinality.
//!
//! Relation cardinality is resolved once, when the schema is built, and
//! stored as an explicit [`RelationKind`] on each relation field. Nothing is
//! inferred at merge time.

mod builder;
pub use builder::{Builder, FieldBuilder, ModelBuilder};

mod field;
pub use field::{Field, FieldId, FieldPrimitive, FieldTy};

mod model;
pub use model::{Model, ModelId};

mod name;
pub use name::Name;

mod pk;
pub use pk::PrimaryKey;

mod relation;
pub use relation::{Relation, RelationKind};

use indexmap::IndexMap;

#[derive(Debug, Default)]
pub struct Schema {
    pub models: IndexMap<ModelId, Model>,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Get a model by ID
    pub fn model(&self, id: impl Into<ModelId>) -> &Model {
        self.models.get(&id.into()).expect("invalid model ID")
    }

    /// Get a field by ID
    pub fn field(&self, id: FieldId) -> &Field {
        self.model(id.model)
            .fields
            .get(id.index)
            .expect("invalid field ID")
    }

    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.models.values()
    }

    pub fn model_by_name(&self, name: &str) -> Option<&Model> {
        let name = Name::new(name);
        self.models().find(|model| model.name == name)
    }
}
