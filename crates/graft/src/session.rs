use crate::object::{FieldValue, Object, ObjectId};
use graft_core::{
    bail, err,
    schema::{FieldId, ModelId, Schema},
    Key, Result, Value,
};
use std::sync::Arc;

/// A store mutation recorded in the session's op log.
///
/// The session never commits; the log lets callers (and tests) observe which
/// objects were registered or removed during a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Insert(ObjectId),
    Delete(ObjectId),
}

/// An explicit persistence context holding the object graph under merge.
///
/// Passed into every reconciler call; there is no ambient session state.
/// Assumes exclusive, single-caller access for the duration of one merge.
pub struct Session {
    schema: Arc<Schema>,
    objects: Vec<Option<Object>>,
    ops: Vec<Op>,
}

impl Session {
    pub fn new(schema: Arc<Schema>) -> Session {
        Session {
            schema,
            objects: vec![],
            ops: vec![],
        }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Register an object with the session.
    pub fn insert(&mut self, object: Object) -> ObjectId {
        let id = ObjectId(self.objects.len());
        self.objects.push(Some(object));
        self.ops.push(Op::Insert(id));
        id
    }

    /// Create and register an empty instance of the model.
    pub fn insert_new(&mut self, model: ModelId) -> ObjectId {
        let object = Object::new(self.schema.model(model));
        self.insert(object)
    }

    /// Remove an object from the store.
    pub fn delete(&mut self, id: ObjectId) -> Result<()> {
        let slot = self
            .objects
            .get_mut(id.0)
            .ok_or_else(|| err!("unknown object {:?}", id))?;

        if slot.take().is_none() {
            bail!("object {:?} was already deleted", id);
        }

        self.ops.push(Op::Delete(id));
        Ok(())
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.get(id.0).is_some_and(|slot| slot.is_some())
    }

    /// Iterate over the identifiers of all live objects.
    pub fn objects(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(index, _)| ObjectId(index))
    }

    pub fn model_of(&self, id: ObjectId) -> Result<ModelId> {
        Ok(self.object(id)?.model)
    }

    /// Query by primary key over the live objects of a model.
    ///
    /// An incomplete key (any null component) never matches; freshly created
    /// objects carry null key components until assigned.
    pub fn get_by_key(&self, model: ModelId, key: &Key) -> Option<ObjectId> {
        if !key.is_complete() {
            return None;
        }

        self.objects().find(|&id| {
            self.objects[id.0]
                .as_ref()
                .is_some_and(|object| object.model == model)
                && self.primary_key_of(id).is_ok_and(|k| &k == key)
        })
    }

    /// The object's primary key tuple, in declared column order.
    pub fn primary_key_of(&self, id: ObjectId) -> Result<Key> {
        let object = self.object(id)?;
        let model = self.schema.model(object.model);

        let mut components = vec![];
        for field in model.primary_key_fields() {
            components.push(self.value(id, field.id)?.clone());
        }

        Ok(Key::new(components))
    }

    /// Read a primitive attribute.
    pub fn value(&self, id: ObjectId, field: FieldId) -> Result<&Value> {
        match self.field_value(id, field)? {
            FieldValue::Value(value) => Ok(value),
            _ => bail!("field {:?} is not a primitive attribute", field),
        }
    }

    /// Write a primitive attribute.
    pub fn set_value(&mut self, id: ObjectId, field: FieldId, value: Value) -> Result<()> {
        match self.field_value_mut(id, field)? {
            FieldValue::Value(slot) => {
                *slot = value;
                Ok(())
            }
            _ => bail!("field {:?} is not a primitive attribute", field),
        }
    }

    /// Read a single-valued relation link.
    pub fn one(&self, id: ObjectId, field: FieldId) -> Result<Option<ObjectId>> {
        match self.field_value(id, field)? {
            FieldValue::One(target) => Ok(*target),
            _ => bail!("field {:?} is not a single-valued relation", field),
        }
    }

    /// Write a single-valued relation link.
    pub fn set_one(&mut self, id: ObjectId, field: FieldId, target: Option<ObjectId>) -> Result<()> {
        match self.field_value_mut(id, field)? {
            FieldValue::One(slot) => {
                *slot = target;
                Ok(())
            }
            _ => bail!("field {:?} is not a single-valued relation", field),
        }
    }

    /// Read a collection relation's membership.
    pub fn collection(&self, id: ObjectId, field: FieldId) -> Result<&[ObjectId]> {
        match self.field_value(id, field)? {
            FieldValue::Many(members) => Ok(members),
            _ => bail!("field {:?} is not a collection relation", field),
        }
    }

    /// Replace a collection relation's membership.
    pub fn set_collection(
        &mut self,
        id: ObjectId,
        field: FieldId,
        members: Vec<ObjectId>,
    ) -> Result<()> {
        match self.field_value_mut(id, field)? {
            FieldValue::Many(slot) => {
                *slot = members;
                Ok(())
            }
            _ => bail!("field {:?} is not a collection relation", field),
        }
    }

    /// The log of store mutations, in application order.
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    fn object(&self, id: ObjectId) -> Result<&Object> {
        self.objects
            .get(id.0)
            .and_then(|slot| slot.as_ref())
            .ok_or_else(|| err!("unknown object {:?}", id))
    }

    fn field_value(&self, id: ObjectId, field: FieldId) -> Result<&FieldValue> {
        let object = self.object(id)?;
        if object.model != field.model {
            bail!("field {:?} does not belong to object {:?}", field, id);
        }
        object
            .fields
            .get(field.index)
            .ok_or_else(|| err!("invalid field {:?}", field))
    }

    fn field_value_mut(&mut self, id: ObjectId, field: FieldId) -> Result<&mut FieldValue> {
        let object = self
            .objects
            .get_mut(id.0)
            .and_then(|slot| slot.as_mut())
            .ok_or_else(|| err!("unknown object {:?}", id))?;

        if object.model != field.model {
            bail!("field {:?} does not belong to object {:?}", field, id);
        }
        object
            .fields
            .get_mut(field.index)
            .ok_or_else(|| err!("invalid field {:?}", field))
    }
}
