use super::{FieldId, FieldTy, Model, ModelId, Schema};

#[derive(Debug, Clone)]
pub struct Relation {
    /// Associated model
    pub target: ModelId,

    /// Cardinality of the relation, resolved when the schema is built
    pub kind: RelationKind,

    /// The relation on the target model that pairs with this one, when known
    pub pair: Option<FieldId>,
}

/// Cardinality of a relation.
///
/// A `has_one` paired with a `belongs_to` classifies both ends as
/// `OneToOne`: the reverse of each is not list-valued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl Relation {
    pub fn target<'a>(&self, schema: &'a Schema) -> &'a Model {
        schema.model(self.target)
    }

    /// True if the relation holds a collection rather than a single value.
    pub fn is_collection(&self) -> bool {
        self.kind.is_collection()
    }
}

impl RelationKind {
    pub fn is_collection(self) -> bool {
        matches!(self, Self::OneToMany | Self::ManyToMany)
    }
}

impl From<Relation> for FieldTy {
    fn from(value: Relation) -> Self {
        Self::Relation(value)
    }
}
