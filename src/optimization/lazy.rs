use log::debug;

/// Auxiliary optimizer state that can only be sized once the parameter count is known.
///
/// Starts `Uninitialized` and moves to `Ready` on the first call to `get_or_alloc`, it never
/// goes back nor gets resized afterwards.
#[derive(Debug, Default)]
pub enum LazyState<S> {
    #[default]
    Uninitialized,
    Ready { len: usize, state: S },
}

impl<S> LazyState<S> {
    /// Returns the state, allocating it on the first call.
    ///
    /// # Arguments
    /// * `len` - The amount of parameters observed on this call.
    /// * `alloc` - Builds the zeroed state for `len` parameters, called at most once.
    ///
    /// # Returns
    /// A mutable reference to the state.
    ///
    /// # Panics
    /// If `len` doesn't match the amount of parameters observed on the first call.
    pub fn get_or_alloc<F>(&mut self, len: usize, alloc: F) -> &mut S
    where
        F: FnOnce(usize) -> S,
    {
        if let LazyState::Uninitialized = self {
            debug!(len = len; "allocating optimizer state");
            *self = LazyState::Ready {
                len,
                state: alloc(len),
            };
        }

        match self {
            LazyState::Ready { len: expected, state } => {
                assert_eq!(
                    *expected, len,
                    "the parameter count changed from {expected} to {len} after the optimizer state was allocated"
                );
                state
            }
            LazyState::Uninitialized => unreachable!("the state was just allocated"),
        }
    }

    /// Returns the state if it has already been allocated.
    pub fn get(&self) -> Option<&S> {
        match self {
            LazyState::Ready { state, .. } => Some(state),
            LazyState::Uninitialized => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LazyState::Ready { .. })
    }
}

/// Allocates a zeroed buffer of `len` elements.
pub fn zeroed(len: usize) -> Box<[f32]> {
    vec![0.; len].into_boxed_slice()
}
