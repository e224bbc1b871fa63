use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::EmitterError;

/// Name of the discriminator field in serialized actions
pub const TYPE_FIELD: &str = "type";

/// Event record: non-empty text ```type``` plus arbitrary JSON payload fields.
///
/// The type is checked on construction, so an ```Action``` value is always valid.
/// Untyped input (e.g. parsed JSON) is converted with ```Action::try_from(value)```,
/// which is also what [emit](crate::EventEmitter::emit) does for [Value] arguments.
///
/// ```
/// use observable_event_emitter::Action;
/// use serde_json::json;
///
/// let order = Action::new("ORDER_CREATED").unwrap().with("id", 1);
/// assert_eq!(order.action_type(), "ORDER_CREATED");
/// assert_eq!(order.get("id"), Some(&json!(1)));
///
/// assert!(Action::try_from(json!({})).is_err());
/// assert!(Action::try_from(json!({ "type": 123 })).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Action {
    #[serde(rename = "type")]
    action_type: String,
    #[serde(flatten)]
    payload: Map<String, Value>,
}

impl Action {
    pub fn new(action_type: impl Into<String>) -> Result<Self, EmitterError> {
        let action_type = action_type.into();
        if action_type.is_empty() {
            return Err(EmitterError::Validation("action type must not be empty"));
        }
        Ok(Self {
            action_type,
            payload: Map::new(),
        })
    }
    pub fn action_type(&self) -> &str {
        &self.action_type
    }
    /// Add payload field. The ```type``` key is reserved and is ignored here.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }
    /// Set payload field, returning previous value. The ```type``` key is reserved and is ignored here.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        if key == TYPE_FIELD {
            warn!(action_type = %self.action_type, "ignoring attempt to overwrite action type");
            return None;
        }
        self.payload.insert(key, value.into())
    }
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }
    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }
}

impl AsRef<Action> for Action {
    fn as_ref(&self) -> &Action {
        self
    }
}

impl TryFrom<Value> for Action {
    type Error = EmitterError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(mut payload) = value else {
            return Err(EmitterError::Validation("action must be a JSON object"));
        };
        let action_type = match payload.remove(TYPE_FIELD) {
            Some(Value::String(action_type)) => action_type,
            Some(_) => return Err(EmitterError::Validation("action type must be a string")),
            None => return Err(EmitterError::Validation("action type is missing")),
        };
        let mut action = Action::new(action_type)?;
        action.payload = payload;
        Ok(action)
    }
}

impl From<Action> for Value {
    fn from(action: Action) -> Self {
        let mut object = action.payload;
        object.insert(TYPE_FIELD.to_owned(), Value::String(action.action_type));
        Value::Object(object)
    }
}
