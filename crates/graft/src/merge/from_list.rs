use super::{from_dict, update_or_create, MergeOptions};
use crate::{ObjectId, Session};
use graft_core::{
    schema::{Field, ModelId},
    Error, Key, Result,
};
use indexmap::IndexMap;
use serde_json::Value as Json;

/// Reconcile an existing collection against a payload sequence of mappings.
///
/// Rows matching an existing member by primary key are merged into that
/// member. Unmatched rows become new objects; under tamper protection a
/// supplied key never claims an existing row outside the collection. Members
/// absent from the payload are unlinked from the collection, and deleted from
/// the store only when `force_delete` is set.
pub fn from_list(
    session: &mut Session,
    entity: ModelId,
    objects: &mut Vec<ObjectId>,
    rows: &[Json],
    options: &MergeOptions,
) -> Result<()> {
    let schema = session.schema().clone();
    let columns: Vec<&Field> = schema.model(entity).primary_key_fields().collect();

    let mut by_key: IndexMap<Key, ObjectId> = IndexMap::new();
    for &member in objects.iter() {
        by_key.insert(session.primary_key_of(member)?, member);
    }

    for row in rows {
        let Some(row) = row.as_object() else {
            return Err(Error::invalid_payload(
                "cannot mix object and non-object rows in a collection payload",
            ));
        };

        let key = Key::from_row(row, &columns)?;
        match by_key.shift_remove(&key) {
            Some(member) => from_dict(session, member, row, options)?,
            None if options.tamper_protection => {
                // The row's identity is not trusted; it becomes a new object
                // regardless of any supplied key.
                let member = session.insert_new(entity);
                from_dict(session, member, row, options)?;
                objects.push(member);
            }
            None => {
                let member = update_or_create(session, entity, row, options)?;
                if !objects.contains(&member) {
                    objects.push(member);
                }
            }
        }
    }

    // Members the payload no longer references fall out of the collection.
    // Only force_delete removes them from the store as well.
    for (_, stale) in by_key {
        objects.retain(|member| *member != stale);
        if options.force_delete {
            session.delete(stale)?;
        }
    }

    Ok(())
}
