use serde_json::Value;

/// Dotted-path accessor over nested objects and arrays.
///
/// On arrays the next segment must be an integer index. Any missing link
/// (absent key, null, primitive, bad index) yields `None`.
pub fn get_by_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }
    path.split('.').try_fold(value, |acc, key| match acc {
        Value::Object(map) => map.get(key),
        Value::Array(items) => key.trim().parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Every path a user can bind to, parents first, object keys in map order.
///
/// Containers and leaves are both listed, parents before their children.
/// Array items use their index as the segment (`result.0.symbol`). A
/// top-level primitive has no paths.
pub fn pickable_paths(value: &Value) -> Vec<String> {
    let mut paths = Vec::new();
    collect_paths(value, "", &mut paths);
    paths
}

fn collect_paths(value: &Value, base: &str, out: &mut Vec<String>) {
    let join = |key: &str| {
        if base.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", base, key)
        }
    };
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = join(key);
                out.push(path.clone());
                collect_paths(child, &path, out);
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                let path = join(&i.to_string());
                out.push(path.clone());
                collect_paths(child, &path, out);
            }
        }
        _ => {}
    }
}
