use serde_json::Value;

use crate::analysis::TaskResult;

/// Turn whatever the summarize call produced into a `TaskResult`.
///
/// Never fails: a missing value, a non-object, a non-string `summary`, or a
/// `tasks` field that is not an array of strings all yield the empty result.
/// Valid input is returned verbatim.
pub fn normalize_task_result(data: Option<&Value>) -> TaskResult {
    let Some(Value::Object(fields)) = data else {
        return TaskResult::default();
    };

    let summary = match fields.get("summary") {
        Some(Value::String(summary)) => summary.clone(),
        _ => return TaskResult::default(),
    };

    let Some(Value::Array(items)) = fields.get("tasks") else {
        return TaskResult::default();
    };

    let mut tasks = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(task) => tasks.push(task.clone()),
            _ => return TaskResult::default(),
        }
    }

    TaskResult { summary, tasks }
}
