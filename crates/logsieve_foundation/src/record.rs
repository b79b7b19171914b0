//! Output record helpers.
//!
//! A normalized event is a JSON object. Motifs contribute values under their
//! capture names; a handful of top-level keys are reserved for the engine
//! itself.

use serde_json::Value;

/// A normalized event under construction.
pub type Record = serde_json::Map<String, Value>;

/// Reserved key: tags of the terminal node on a successful match.
pub const EVENT_TAGS_KEY: &str = "event.tags";

/// Reserved key: the full input line, added when normalization fails.
pub const ORIGINAL_MSG_KEY: &str = "originalmsg";

/// Reserved key: the unconsumed tail of the input, added on failure.
pub const UNPARSED_DATA_KEY: &str = "unparsed-data";

/// The capture name that splices an object's fields into the current record.
pub const SPLICE_NAME: &str = ".";

/// Stores a captured value into `record` under `name`.
///
/// Three cases:
/// - `None`: the value is discarded (no capture).
/// - `Some(".")`: if the value is an object, its fields are merged into
///   `record`; any other value is stored under the literal key `"."`.
/// - `Some(key)`: the value is stored under `key`.
pub fn store_capture(record: &mut Record, name: Option<&str>, value: Value) {
    match name {
        None => {}
        Some(SPLICE_NAME) => match value {
            Value::Object(fields) => {
                for (key, val) in fields {
                    record.insert(key, val);
                }
            }
            other => {
                record.insert(SPLICE_NAME.to_string(), other);
            }
        },
        Some(key) => {
            record.insert(key.to_string(), value);
        }
    }
}

/// Records a normalization failure: the original message plus everything
/// from the deepest offset any parser reached.
pub fn add_unparsed(record: &mut Record, input: &str, deepest: usize) {
    let tail = input.get(deepest..).unwrap_or("");
    record.insert(
        ORIGINAL_MSG_KEY.to_string(),
        Value::String(input.to_string()),
    );
    record.insert(UNPARSED_DATA_KEY.to_string(), Value::String(tail.to_string()));
}
