use super::{from_dict, MergeOptions};
use crate::{ObjectId, Session};
use graft_core::{
    schema::{Field, ModelId},
    Error, Key, Result,
};
use serde_json::{Map as JsonMap, Value as Json};

/// Resolve or create a root object by primary key, then merge the payload
/// into it.
///
/// When every primary key field is present and non-empty in the payload, the
/// existing object is fetched; a missing row is an error rather than an
/// invitation to create one under a chosen key. Otherwise a fresh instance
/// is created and registered.
pub fn update_or_create(
    session: &mut Session,
    entity: ModelId,
    data: &JsonMap<String, Json>,
    options: &MergeOptions,
) -> Result<ObjectId> {
    let schema = session.schema().clone();
    let columns: Vec<&Field> = schema.model(entity).primary_key_fields().collect();

    let supplied = columns.iter().all(|column| match data.get(column.name()) {
        None | Some(Json::Null) => false,
        Some(Json::String(s)) => !s.is_empty(),
        Some(_) => true,
    });

    let obj = if supplied {
        let key = Key::from_row(data, &columns)?;
        session
            .get_by_key(entity, &key)
            .ok_or_else(|| Error::record_not_found("cannot create with primary key"))?
    } else {
        session.insert_new(entity)
    };

    from_dict(session, obj, data, options)?;
    Ok(obj)
}
