//! Workflow resolution: which upstream workflow a request targets.
//!
//! First match wins:
//! 1. `workflow.id` in the request body
//! 2. `workflowId` in the request body
//! 3. the process-level fallback resolved at startup
//!
//! Every candidate is trimmed; a value that trims to empty, or is not a
//! JSON string, is skipped. The id itself is passed upstream unvalidated.

use serde_json::Value;

pub fn resolve_workflow_id(body: Option<&Value>, fallback: Option<&str>) -> Option<String> {
    let from_body = body.and_then(|b| {
        let nested = b
            .get("workflow")
            .filter(|w| w.is_object())
            .and_then(|w| w.get("id"))
            .and_then(non_blank);
        nested.or_else(|| b.get("workflowId").and_then(non_blank))
    });

    from_body.or_else(|| {
        fallback
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    })
}

fn non_blank(v: &Value) -> Option<String> {
    v.as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}
