//! Renderer warnings, deduplicated and routed through `tracing`.
//!
//! Element construction, the host document and the literal reader all report
//! input they silently ignore (a `children` key in a property map, an
//! assignment to a text node that has no such field). The same message is
//! only emitted once per process until [`clear_warnings`] is called.

use std::collections::HashSet;
use std::sync::Mutex;

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about ignored input (emits once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("DOM", "ignoring property 'title' on text node");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_emit = WARNED
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_emit {
        tracing::warn!(component, "{message}");
    }
}

/// Whether `message` has already been reported for `component`.
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key))
}

/// Clear all recorded warnings (call when starting a new render session)
pub fn clear_warnings() {
    let mut guard = WARNED
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warn_once_deduplicates_until_cleared() {
        let message = "the same ignored input twice";
        assert!(!has_warned("Test", message));
        warn_once("Test", message);
        warn_once("Test", message);
        assert!(has_warned("Test", message));
        // Same message under another component is a distinct warning.
        assert!(!has_warned("Other", message));

        clear_warnings();
        assert!(!has_warned("Test", message));
        warn_once("Test", message);
        assert!(has_warned("Test", message));
    }
}
