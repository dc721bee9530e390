use super::{json_type_name, Value};
use crate::{schema::Field, Error, Result};

/// A primary key tuple, one component per key column in declared order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    components: Vec<Value>,
}

impl Key {
    pub fn new(components: Vec<Value>) -> Key {
        Key { components }
    }

    pub fn components(&self) -> &[Value] {
        &self.components
    }

    /// True when every component is present and non-null.
    ///
    /// Freshly created objects have null key components until the caller
    /// assigns them; an incomplete key never matches a lookup.
    pub fn is_complete(&self) -> bool {
        !self.components.is_empty() && self.components.iter().all(|value| !value.is_null())
    }

    /// Coerce a raw payload scalar into a key for the given key columns.
    ///
    /// Composite keys are expressed as slash-delimited strings, one component
    /// per key column in declared order: `"3/7"` against a two-column integer
    /// key yields `(3, 7)`.
    pub fn coerce(raw: &serde_json::Value, columns: &[&Field]) -> Result<Key> {
        if columns.len() > 1 {
            let Some(joined) = raw.as_str() else {
                return Err(Error::type_conversion(
                    json_type_name(raw),
                    "composite key string",
                ));
            };

            let parts: Vec<&str> = joined.split('/').collect();
            if parts.len() != columns.len() {
                return Err(Error::type_conversion(
                    format!("string `{joined}` with {} components", parts.len()),
                    "composite key string",
                ));
            }

            let components = parts
                .iter()
                .zip(columns)
                .map(|(part, column)| {
                    let ty = column.ty.expect_primitive().ty;
                    ty.coerce(&serde_json::Value::String(part.to_string()))
                })
                .collect::<Result<Vec<_>>>()?;

            return Ok(Key::new(components));
        }

        let [column] = columns else {
            return Err(Error::invalid_schema("key lookup requires key columns"));
        };

        let ty = column.ty.expect_primitive().ty;
        Ok(Key::new(vec![ty.coerce(raw)?]))
    }

    /// Compute a key tuple from a payload mapping's own fields.
    ///
    /// Missing fields yield null components, so a row without identity never
    /// matches an existing object.
    pub fn from_row(
        row: &serde_json::Map<String, serde_json::Value>,
        columns: &[&Field],
    ) -> Result<Key> {
        let components = columns
            .iter()
            .map(|column| match row.get(column.name()) {
                Some(raw) => {
                    let ty = column.ty.expect_primitive().ty;
                    ty.coerce(raw)
                }
                None => Ok(Value::Null),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Key::new(components))
    }
}
