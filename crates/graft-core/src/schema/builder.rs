use super::{
    Field, FieldId, FieldPrimitive, FieldTy, Model, ModelId, Name, PrimaryKey, Relation,
    RelationKind, Schema,
};
use crate::{value::Type, Error, Result};
use indexmap::IndexMap;

/// Programmatic schema declaration.
///
/// Relations are declared by direction (`has_many`, `has_one`, `belongs_to`,
/// `many_to_many`); cardinality and pairing are resolved by [`Builder::build`].
#[derive(Default)]
pub struct Builder {
    models: Vec<ModelBuilder>,
}

pub struct ModelBuilder {
    name: Name,
    fields: Vec<FieldBuilder>,
}

pub struct FieldBuilder {
    name: String,
    def: FieldDef,
    nullable: bool,
    primary_key: bool,
}

#[derive(Clone)]
enum FieldDef {
    Primitive(Type),
    HasMany(String),
    HasOne(String),
    BelongsTo(String),
    ManyToMany(String),
}

impl Builder {
    /// Register a model and return its builder.
    pub fn model(&mut self, name: &str) -> &mut ModelBuilder {
        self.models.push(ModelBuilder {
            name: Name::new(name),
            fields: vec![],
        });
        self.models.last_mut().unwrap()
    }

    /// Resolve relation targets, link relation pairs, classify cardinality,
    /// and validate primary keys.
    pub fn build(self) -> Result<Schema> {
        // Model identifiers are reserved by registration order before any
        // field is materialized, so relations can reference models declared
        // later.
        let mut ids: IndexMap<Name, ModelId> = IndexMap::new();
        for (index, model) in self.models.iter().enumerate() {
            if ids.insert(model.name.clone(), ModelId(index)).is_some() {
                return Err(Error::invalid_schema(format!(
                    "duplicate model `{}`",
                    model.name.upper_camel_case()
                )));
            }
        }

        // First pass: materialize fields. Relations start with their declared
        // kind and an unresolved pair.
        let mut decls: Vec<Vec<FieldDef>> = vec![];
        let mut models: Vec<Model> = vec![];

        for (index, model) in self.models.iter().enumerate() {
            let model_id = ModelId(index);
            let mut fields = vec![];
            let mut pk_fields = vec![];

            for (field_index, field) in model.fields.iter().enumerate() {
                let field_id = model_id.field(field_index);

                let ty = match &field.def {
                    FieldDef::Primitive(ty) => FieldTy::Primitive(FieldPrimitive { ty: *ty }),
                    FieldDef::HasMany(target)
                    | FieldDef::HasOne(target)
                    | FieldDef::BelongsTo(target)
                    | FieldDef::ManyToMany(target) => {
                        let target = *ids.get(&Name::new(target)).ok_or_else(|| {
                            Error::invalid_schema(format!(
                                "field `{}::{}` references a model that was not registered \
                                 with the schema",
                                model.name.upper_camel_case(),
                                field.name,
                            ))
                        })?;

                        Relation {
                            target,
                            kind: field.def.declared_kind(),
                            pair: None,
                        }
                        .into()
                    }
                };

                if field.primary_key {
                    if !ty.is_primitive() {
                        return Err(Error::invalid_schema(format!(
                            "primary key field `{}::{}` must be a primitive",
                            model.name.upper_camel_case(),
                            field.name,
                        )));
                    }
                    pk_fields.push(field_id);
                }

                fields.push(Field {
                    id: field_id,
                    name: field.name.clone(),
                    ty,
                    nullable: field.nullable,
                    primary_key: field.primary_key,
                });
            }

            if pk_fields.is_empty() {
                return Err(Error::invalid_schema(format!(
                    "model `{}` has no primary key",
                    model.name.upper_camel_case()
                )));
            }

            decls.push(model.fields.iter().map(|field| field.def.clone()).collect());
            models.push(Model {
                id: model_id,
                name: model.name.clone(),
                fields,
                primary_key: PrimaryKey { fields: pk_fields },
            });
        }

        // Link relation pairs. Arbitrary models are mutated while linking, so
        // iteration is index based.
        for curr in 0..models.len() {
            for index in 0..models[curr].fields.len() {
                let src = models[curr].id;

                match &decls[curr][index] {
                    FieldDef::HasMany(_) | FieldDef::HasOne(_) => {
                        let field_id = models[curr].fields[index].id;
                        let target = models[curr].fields[index].ty.expect_relation().target;
                        let pair = find_belongs_to_pair(
                            &models,
                            &decls,
                            src,
                            target,
                            &models[curr].fields[index].name,
                        )?;

                        models[curr].fields[index].ty.expect_relation_mut().pair = Some(pair);

                        // Link the reverse end. A `belongs_to` paired with a
                        // `has_one` is reclassified as one-to-one: its reverse
                        // is not list-valued.
                        let reverse =
                            models[pair.model.0].fields[pair.index].ty.expect_relation_mut();
                        reverse.pair = Some(field_id);
                        if matches!(decls[curr][index], FieldDef::HasOne(_)) {
                            reverse.kind = RelationKind::OneToOne;
                        }
                    }
                    FieldDef::ManyToMany(_) => {
                        let field_id = models[curr].fields[index].id;
                        let target = models[curr].fields[index].ty.expect_relation().target;
                        let pair =
                            find_many_to_many_pair(&models, &decls, src, target, field_id)?;

                        models[curr].fields[index].ty.expect_relation_mut().pair = pair;
                    }
                    _ => {}
                }
            }
        }

        Ok(Schema {
            models: models.into_iter().map(|model| (model.id, model)).collect(),
        })
    }
}

/// Find the single `belongs_to` relation on `target` that references `src`.
///
/// More than one candidate makes the reverse ambiguous; that is a schema
/// definition error, surfaced here rather than at merge time.
fn find_belongs_to_pair(
    models: &[Model],
    decls: &[Vec<FieldDef>],
    src: ModelId,
    target: ModelId,
    field_name: &str,
) -> Result<FieldId> {
    let candidates: Vec<FieldId> = models[target.0]
        .fields
        .iter()
        .enumerate()
        .filter(|(index, field)| {
            matches!(decls[target.0][*index], FieldDef::BelongsTo(_))
                && field.ty.expect_relation().target == src
        })
        .map(|(_, field)| field.id)
        .collect();

    match candidates[..] {
        [pair] => Ok(pair),
        [] => Err(Error::invalid_schema(format!(
            "field `{}::{}` has no matching `belongs_to` relation on the target model",
            models[src.0].name.upper_camel_case(),
            field_name,
        ))),
        _ => Err(Error::invalid_schema(format!(
            "model `{}` has more than one `belongs_to` relation targeting `{}`",
            models[target.0].name.upper_camel_case(),
            models[src.0].name.upper_camel_case(),
        ))),
    }
}

/// Find the reverse `many_to_many` relation on `target`, if any.
///
/// A one-way association is permitted; ambiguity is not.
fn find_many_to_many_pair(
    models: &[Model],
    decls: &[Vec<FieldDef>],
    src: ModelId,
    target: ModelId,
    field_id: FieldId,
) -> Result<Option<FieldId>> {
    let candidates: Vec<FieldId> = models[target.0]
        .fields
        .iter()
        .enumerate()
        .filter(|(index, field)| {
            field.id != field_id
                && matches!(decls[target.0][*index], FieldDef::ManyToMany(_))
                && field.ty.expect_relation().target == src
        })
        .map(|(_, field)| field.id)
        .collect();

    match candidates[..] {
        [] => Ok(None),
        [pair] => Ok(Some(pair)),
        _ => Err(Error::invalid_schema(format!(
            "model `{}` has more than one `many_to_many` relation targeting `{}`",
            models[target.0].name.upper_camel_case(),
            models[src.0].name.upper_camel_case(),
        ))),
    }
}

impl ModelBuilder {
    /// Declare a primitive field.
    pub fn field(&mut self, name: &str, ty: Type) -> &mut FieldBuilder {
        self.push(name, FieldDef::Primitive(ty))
    }

    /// Declare a collection relation whose target rows belong to this model.
    pub fn has_many(&mut self, name: &str, target: &str) -> &mut FieldBuilder {
        self.push(name, FieldDef::HasMany(target.to_string()))
    }

    /// Declare a single-valued relation whose target row belongs to this
    /// model. Classified one-to-one together with its `belongs_to` pair.
    pub fn has_one(&mut self, name: &str, target: &str) -> &mut FieldBuilder {
        self.push(name, FieldDef::HasOne(target.to_string()))
    }

    /// Declare the owning side of a relation.
    pub fn belongs_to(&mut self, name: &str, target: &str) -> &mut FieldBuilder {
        self.push(name, FieldDef::BelongsTo(target.to_string()))
    }

    /// Declare a many-to-many association.
    pub fn many_to_many(&mut self, name: &str, target: &str) -> &mut FieldBuilder {
        self.push(name, FieldDef::ManyToMany(target.to_string()))
    }

    fn push(&mut self, name: &str, def: FieldDef) -> &mut FieldBuilder {
        self.fields.push(FieldBuilder {
            name: name.to_string(),
            def,
            nullable: false,
            primary_key: false,
        });
        self.fields.last_mut().unwrap()
    }
}

impl FieldBuilder {
    /// Mark the field as part of the primary key.
    pub fn primary_key(&mut self) -> &mut Self {
        self.primary_key = true;
        self
    }

    /// Mark the field as nullable.
    pub fn nullable(&mut self) -> &mut Self {
        self.nullable = true;
        self
    }
}

impl FieldDef {
    fn declared_kind(&self) -> RelationKind {
        match self {
            FieldDef::HasMany(_) => RelationKind::OneToMany,
            FieldDef::HasOne(_) => RelationKind::OneToOne,
            FieldDef::BelongsTo(_) => RelationKind::ManyToOne,
            FieldDef::ManyToMany(_) => RelationKind::ManyToMany,
            FieldDef::Primitive(_) => panic!("primitive fields have no relation kind"),
        }
    }
}
