use super::{ModelId, Relation, Schema};
use crate::value::Type;
use std::fmt;

#[derive(Debug, Clone)]
pub struct Field {
    /// Uniquely identifies the field within the containing model.
    pub id: FieldId,

    /// The field name, as it appears in payload keys
    pub name: String,

    /// Primitive or relation
    pub ty: FieldTy,

    /// True if the field can be null
    pub nullable: bool,

    /// True if the field is part of the primary key
    pub primary_key: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct FieldId {
    pub model: ModelId,
    pub index: usize,
}

#[derive(Clone)]
pub enum FieldTy {
    Primitive(FieldPrimitive),
    Relation(Relation),
}

#[derive(Debug, Clone)]
pub struct FieldPrimitive {
    /// The field's primitive type
    pub ty: Type,
}

impl Field {
    /// Gets the id.
    pub fn id(&self) -> FieldId {
        self.id
    }

    /// Gets the name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the type.
    pub fn ty(&self) -> &FieldTy {
        &self.ty
    }

    /// Gets whether the field is part of the primary key.
    pub fn primary_key(&self) -> bool {
        self.primary_key
    }

    pub fn is_relation(&self) -> bool {
        self.ty.is_relation()
    }

    /// Returns a fully qualified name for the field.
    pub fn full_name(&self, schema: &Schema) -> String {
        let model = schema.model(self.id.model);
        format!("{}::{}", model.name.upper_camel_case(), self.name)
    }
}

impl FieldTy {
    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(..))
    }

    pub fn as_primitive(&self) -> Option<&FieldPrimitive> {
        match self {
            Self::Primitive(primitive) => Some(primitive),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_primitive(&self) -> &FieldPrimitive {
        match self {
            Self::Primitive(primitive) => primitive,
            _ => panic!("expected primitive field, but was {self:?}"),
        }
    }

    pub fn is_relation(&self) -> bool {
        matches!(self, Self::Relation(..))
    }

    pub fn as_relation(&self) -> Option<&Relation> {
        match self {
            Self::Relation(relation) => Some(relation),
            _ => None,
        }
    }

    #[track_caller]
    pub fn expect_relation(&self) -> &Relation {
        match self {
            Self::Relation(relation) => relation,
            _ => panic!("expected field to be a relation, but was {self:?}"),
        }
    }

    #[track_caller]
    pub(crate) fn expect_relation_mut(&mut self) -> &mut Relation {
        match self {
            Self::Relation(relation) => relation,
            _ => panic!("expected field to be a relation, but was {self:?}"),
        }
    }
}

impl fmt::Debug for FieldTy {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(ty) => ty.fmt(fmt),
            Self::Relation(ty) => ty.fmt(fmt),
        }
    }
}

impl From<&Self> for FieldId {
    fn from(val: &Self) -> Self {
        *val
    }
}

impl From<&Field> for FieldId {
    fn from(val: &Field) -> Self {
        val.id
    }
}

impl fmt::Debug for FieldId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "FieldId({}/{})", self.model.0, self.index)
    }
}
