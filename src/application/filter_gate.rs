//! Focus-based suppression of log records.

/// Decide whether a record with `context` is dropped under `focus`.
///
/// No focus (or an empty one) lets everything through. With a focus set, the
/// record survives only if its context contains the focus tag exactly; an
/// empty context has nothing to match and is always dropped.
pub fn should_suppress<S: AsRef<str>>(context: &[S], focus: Option<&str>) -> bool {
    match focus {
        None | Some("") => false,
        Some(tag) => !context.iter().any(|segment| segment.as_ref() == tag),
    }
}
