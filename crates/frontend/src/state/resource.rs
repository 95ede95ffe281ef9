/// Last fetched snapshot of a collection plus its request flags.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

impl<T> ResourceState<T> {
    /// A request is in flight; the previous error is cleared.
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Apply a finished request. On failure the old snapshot stays.
    pub fn finish(&mut self, result: Result<Vec<T>, String>) {
        match result {
            Ok(items) => self.items = items,
            Err(message) => self.error = Some(message),
        }
        self.loading = false;
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_sets_loading_and_clears_error() {
        let mut state: ResourceState<u32> = ResourceState {
            error: Some("boom".into()),
            ..Default::default()
        };
        state.begin();
        assert!(state.loading);
        assert_eq!(state.error, None);
    }

    #[test]
    fn success_replaces_snapshot() {
        let mut state = ResourceState {
            items: vec![1, 2],
            ..Default::default()
        };
        state.begin();
        state.finish(Ok(vec![3]));
        assert_eq!(state.items, vec![3]);
        assert!(!state.loading);
        assert_eq!(state.error, None);
    }

    #[test]
    fn failure_keeps_snapshot_and_records_message() {
        let mut state = ResourceState {
            items: vec![1, 2],
            ..Default::default()
        };
        state.begin();
        state.finish(Err("Request failed: 500".into()));
        assert_eq!(state.items, vec![1, 2]);
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Request failed: 500"));
    }
}
