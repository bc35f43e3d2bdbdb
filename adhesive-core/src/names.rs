//! Event name arguments.

/// Conversion into an ordered list of event names.
///
/// Lets builders and publishers accept a single name or a collection:
///
/// ```rust,ignore
/// bus.subscribe("users:read");
/// bus.subscribe(["users:read", "users:list"]);
/// ```
pub trait IntoEventNames {
    /// Convert into owned event names, preserving order.
    fn into_event_names(self) -> Vec<String>;
}

impl IntoEventNames for &str {
    fn into_event_names(self) -> Vec<String> {
        vec![self.to_owned()]
    }
}

impl IntoEventNames for String {
    fn into_event_names(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoEventNames for &String {
    fn into_event_names(self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl<S: Into<String>> IntoEventNames for Vec<S> {
    fn into_event_names(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<S: Into<String>, const N: usize> IntoEventNames for [S; N] {
    fn into_event_names(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<S: AsRef<str>> IntoEventNames for &[S] {
    fn into_event_names(self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_owned()).collect()
    }
}

/// Compose the event name fired for a task.
///
/// `task` is joined to `event` with `:` unless it already starts with one,
/// so `("users", "read")` and `("users", ":read")` both give `"users:read"`.
/// A task may itself contain `:` for sub-tasks.
pub fn task_event_name(event: &str, task: &str) -> String {
    if task.starts_with(':') {
        format!("{event}{task}")
    } else {
        format!("{event}:{task}")
    }
}
