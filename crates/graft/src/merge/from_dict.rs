use super::{from_list, MergeOptions, UnknownKeys};
use crate::{ObjectId, Session};
use graft_core::{
    schema::{Field, FieldTy, Model, Relation, RelationKind, Schema},
    Error, Key, Result,
};
use serde_json::{Map as JsonMap, Value as Json};

/// Merge a payload mapping into a mapped object.
///
/// Nested mappings recurse into single-valued relations, creating a fresh
/// related instance when none is linked. Sequences of mappings reconcile
/// collection relations via [`from_list`]. Primary key fields present in the
/// payload never overwrite the object's identity. Unknown keys follow the
/// configured [`UnknownKeys`] policy.
pub fn from_dict(
    session: &mut Session,
    obj: ObjectId,
    data: &JsonMap<String, Json>,
    options: &MergeOptions,
) -> Result<()> {
    let schema = session.schema().clone();
    let model = schema.model(session.model_of(obj)?);

    for (name, value) in data {
        let Some(field) = model.field_by_name(name) else {
            unknown_key(model, name, options)?;
            continue;
        };

        match value {
            Json::Object(nested) => merge_nested(session, &schema, obj, field, nested, options)?,
            Json::Array(rows) if rows.first().is_some_and(Json::is_object) => {
                let Some(relation) = field.ty.as_relation().filter(|rel| rel.is_collection())
                else {
                    return Err(Error::invalid_payload(format!(
                        "object rows for non-collection field `{}`",
                        field.full_name(&schema),
                    )));
                };

                let mut members = session.collection(obj, field.id)?.to_vec();
                from_list(session, relation.target, &mut members, rows, options)?;
                session.set_collection(obj, field.id, members)?;
            }
            // Tamper protection: identity is read-only during merge.
            _ if field.primary_key => continue,
            _ => assign(session, &schema, obj, field, value)?,
        }
    }

    Ok(())
}

/// Recurse into the related object behind a single-valued relation.
fn merge_nested(
    session: &mut Session,
    schema: &Schema,
    obj: ObjectId,
    field: &Field,
    nested: &JsonMap<String, Json>,
    options: &MergeOptions,
) -> Result<()> {
    let FieldTy::Relation(relation) = &field.ty else {
        return Err(Error::invalid_payload(format!(
            "object payload for non-relation field `{}`",
            field.full_name(schema),
        )));
    };

    if relation.is_collection() {
        return Err(Error::invalid_payload(format!(
            "object payload for collection relation `{}`",
            field.full_name(schema),
        )));
    }

    let child = match session.one(obj, field.id)? {
        Some(child) => child,
        None => {
            let child = session.insert_new(relation.target);
            session.set_one(obj, field.id, Some(child))?;
            child
        }
    };

    from_dict(session, child, nested, options)
}

/// Assign a scalar (or scalar sequence) payload value onto a field.
fn assign(
    session: &mut Session,
    schema: &Schema,
    obj: ObjectId,
    field: &Field,
    raw: &Json,
) -> Result<()> {
    match &field.ty {
        FieldTy::Primitive(primitive) => {
            let value = primitive.ty.coerce(raw)?;
            session.set_value(obj, field.id, value)
        }
        FieldTy::Relation(relation) if relation.is_collection() => {
            assign_members(session, schema, obj, field, relation, raw)
        }
        FieldTy::Relation(relation) => {
            if raw.is_null() {
                // A one-to-one's related object does not survive the link
                // being nulled; it is deleted from the store first.
                if relation.kind == RelationKind::OneToOne {
                    if let Some(child) = session.one(obj, field.id)? {
                        session.delete(child)?;
                    }
                }
                return session.set_one(obj, field.id, None);
            }

            let columns: Vec<&Field> = relation.target(schema).primary_key_fields().collect();
            let key = Key::coerce(raw, &columns)?;
            let found = session.get_by_key(relation.target, &key);
            session.set_one(obj, field.id, found)
        }
    }
}

/// Membership assignment for a collection relation from scalar identifiers,
/// as submitted by multi-selection widgets. Only identifiers that resolve to
/// an existing row are kept.
fn assign_members(
    session: &mut Session,
    schema: &Schema,
    obj: ObjectId,
    field: &Field,
    relation: &Relation,
    raw: &Json,
) -> Result<()> {
    if raw.is_null() {
        return Err(Error::invalid_payload(format!(
            "cannot assign null to collection relation `{}`",
            field.full_name(schema),
        )));
    }

    let items: Vec<&Json> = match raw {
        Json::Array(items) => items.iter().collect(),
        _ => vec![raw],
    };

    let columns: Vec<&Field> = relation.target(schema).primary_key_fields().collect();

    let mut members = vec![];
    for item in items {
        if item.is_object() {
            return Err(Error::invalid_payload(
                "cannot mix object and non-object rows in a collection payload",
            ));
        }

        let key = Key::coerce(item, &columns)?;
        if let Some(found) = session.get_by_key(relation.target, &key) {
            members.push(found);
        }
    }

    session.set_collection(obj, field.id, members)
}

fn unknown_key(model: &Model, name: &str, options: &MergeOptions) -> Result<()> {
    match options.unknown_keys {
        UnknownKeys::Discard => Ok(()),
        UnknownKeys::Reject => Err(Error::unknown_field(model.name.upper_camel_case(), name)),
    }
}
