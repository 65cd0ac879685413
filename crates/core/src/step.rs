//! Explicit continue/stop signal threaded through the steps of an action.

/// Outcome of one step of an action.
///
/// `Stop` means the step already reported why (through the notifier) and
/// nothing downstream should run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Step<T> {
    Continue(T),
    Stop,
}

impl<T> Step<T> {
    pub fn is_continue(&self) -> bool {
        matches!(self, Step::Continue(_))
    }

    pub fn is_stop(&self) -> bool {
        matches!(self, Step::Stop)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Step<U> {
        match self {
            Step::Continue(value) => Step::Continue(f(value)),
            Step::Stop => Step::Stop,
        }
    }

    /// Chains a step that only runs when this one continued.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Step<U>) -> Step<U> {
        match self {
            Step::Continue(value) => f(value),
            Step::Stop => Step::Stop,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Step::Continue(value) => Some(value),
            Step::Stop => None,
        }
    }
}

impl<T> From<Option<T>> for Step<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Step::Continue(v),
            None => Step::Stop,
        }
    }
}
