//! Synchronized state access for the process-wide log router.
//!
//! `SharedState` hides whether the router sits behind an Embassy
//! critical-section mutex (bare-metal targets) or a plain `RefCell`
//! (host builds, where the router is thread-local).

/// Closure-scoped access to state owned by a synchronization wrapper.
///
/// # Example
///
/// ```ignore
/// fn bump<S: SharedState<u32>>(state: &S) -> u32 {
///     state.with_mut(|v| {
///         *v += 1;
///         *v
///     })
/// }
/// ```
pub trait SharedState<T> {
    /// Access state immutably.
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R;

    /// Access state mutably.
    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R;
}

#[cfg(feature = "embassy")]
use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};

/// Critical-section protected state, usable from tasks and interrupt handlers.
#[cfg(feature = "embassy")]
pub struct EmbassyState<T> {
    inner: Mutex<CriticalSectionRawMutex, core::cell::RefCell<T>>,
}

#[cfg(feature = "embassy")]
impl<T> EmbassyState<T> {
    /// Const so it can initialize a `static`.
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(core::cell::RefCell::new(value)),
        }
    }
}

#[cfg(feature = "embassy")]
impl<T> SharedState<T> for EmbassyState<T> {
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        self.inner.lock(|cell| f(&cell.borrow()))
    }

    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }
}

/// Single-threaded state backed by `RefCell`.
///
/// # Panics
///
/// Panics on a borrow conflict, e.g. calling `with_mut` from inside `with`.
///
/// ```
/// use nvs32::core::traits::sync::{LocalState, SharedState};
///
/// let state = LocalState::new(42u32);
/// state.with_mut(|v| *v += 1);
/// assert_eq!(state.with(|v| *v), 43);
/// ```
pub struct LocalState<T> {
    inner: core::cell::RefCell<T>,
}

impl<T> LocalState<T> {
    pub const fn new(value: T) -> Self {
        Self {
            inner: core::cell::RefCell::new(value),
        }
    }
}

impl<T> SharedState<T> for LocalState<T> {
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.inner.borrow())
    }

    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        f(&mut self.inner.borrow_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_state_read_modify_read() {
        let state = LocalState::new(0u32);
        assert_eq!(state.with(|v| *v), 0);

        state.with_mut(|v| *v += 10);

        assert_eq!(state.with(|v| *v), 10);
    }

    #[test]
    fn local_state_closure_return_value() {
        let state = LocalState::new(vec![1, 2, 3]);

        let sum: i32 = state.with(|v| v.iter().sum());
        assert_eq!(sum, 6);

        let new_len = state.with_mut(|v| {
            v.push(4);
            v.len()
        });
        assert_eq!(new_len, 4);
    }

    #[test]
    #[should_panic(expected = "already borrowed")]
    fn local_state_double_borrow_panics() {
        let state = LocalState::new(0u32);
        state.with(|_v| {
            let _ = state.inner.borrow_mut();
        });
    }
}
