use serde_json::Value;

/// Recursively merges `from` into `into`. Objects merge key by key; any other
/// non-null value replaces the target, and nulls leave the target untouched.
pub(crate) fn merge_non_null_json_value(from: Value, into: &mut Value) {
    match (from, into) {
        (Value::Object(from), Value::Object(into)) => {
            for (key, value) in from {
                match into.get_mut(&key) {
                    Some(existing) => merge_non_null_json_value(value, existing),
                    None if !value.is_null() => {
                        into.insert(key, value);
                    }
                    None => {}
                }
            }
        }
        (Value::Null, _) => {}
        (from, into) => *into = from,
    }
}
