use serde_json::Value;

use crate::error::{ProcessorError, Result};
use crate::types::WorkItem;

/// Ordered, validated sequence of numeric work items.
///
/// A `Batch` can only be obtained from input that is a sequence of numbers,
/// so holding one means validation has already passed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    items: Vec<WorkItem>,
}

impl Batch {
    pub fn new(items: Vec<WorkItem>) -> Self {
        Self { items }
    }

    /// Validate a loosely typed JSON value.
    ///
    /// The value must be an array and every element a JSON number.
    pub fn from_json_value(value: &Value) -> Result<Self> {
        match value {
            Value::Array(elements) => Self::from_json_elements(elements),
            other => Err(ProcessorError::InvalidInput(format!(
                "items must be a sequence, got {}",
                json_kind(other)
            ))),
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).map_err(|e| {
            ProcessorError::InvalidInput(format!("items are not valid JSON: {}", e))
        })?;
        Self::from_json_value(&value)
    }

    fn from_json_elements(elements: &[Value]) -> Result<Self> {
        let items = elements
            .iter()
            .enumerate()
            .map(|(idx, element)| {
                element.as_f64().ok_or_else(|| {
                    ProcessorError::InvalidInput(format!(
                        "item {} is not a number: {}",
                        idx, element
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { items })
    }

    /// Parse textual items, one number per token.
    pub fn parse_items<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        let items = tokens
            .iter()
            .enumerate()
            .map(|(idx, token)| {
                let token = token.as_ref();
                token.trim().parse::<f64>().map_err(|_| {
                    ProcessorError::InvalidInput(format!(
                        "item {} is not a number: '{}'",
                        idx, token
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[WorkItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WorkItem> {
        self.items.iter()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl<'a> IntoIterator for &'a Batch {
    type Item = &'a WorkItem;
    type IntoIter = std::slice::Iter<'a, WorkItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Conversion into a validated [`Batch`].
///
/// Typed numeric collections always succeed; loosely typed inputs are
/// checked and fail with [`ProcessorError::InvalidInput`].
pub trait IntoBatch {
    fn into_batch(self) -> Result<Batch>;
}

impl IntoBatch for Batch {
    fn into_batch(self) -> Result<Batch> {
        Ok(self)
    }
}

impl IntoBatch for &Batch {
    fn into_batch(self) -> Result<Batch> {
        Ok(self.clone())
    }
}

impl IntoBatch for Vec<f64> {
    fn into_batch(self) -> Result<Batch> {
        Ok(Batch::new(self))
    }
}

impl IntoBatch for &[f64] {
    fn into_batch(self) -> Result<Batch> {
        Ok(Batch::new(self.to_vec()))
    }
}

impl<const N: usize> IntoBatch for [f64; N] {
    fn into_batch(self) -> Result<Batch> {
        Ok(Batch::new(self.to_vec()))
    }
}

impl IntoBatch for Vec<i64> {
    fn into_batch(self) -> Result<Batch> {
        self.as_slice().into_batch()
    }
}

impl IntoBatch for &[i64] {
    fn into_batch(self) -> Result<Batch> {
        Ok(Batch::new(self.iter().map(|&n| n as f64).collect()))
    }
}

impl IntoBatch for Value {
    fn into_batch(self) -> Result<Batch> {
        Batch::from_json_value(&self)
    }
}

impl IntoBatch for &Value {
    fn into_batch(self) -> Result<Batch> {
        Batch::from_json_value(self)
    }
}

impl IntoBatch for Vec<Value> {
    fn into_batch(self) -> Result<Batch> {
        Batch::from_json_elements(&self)
    }
}

impl IntoBatch for &[Value] {
    fn into_batch(self) -> Result<Batch> {
        Batch::from_json_elements(self)
    }
}
