//! Observable single-value cells
//!
//! A cell holds one current value, read and written through one accessor.
//! Writes go through [`Observable::set`] only; the app loop redraws after
//! every event or poll result that reaches it.

use tokio::sync::watch;

pub struct Observable<T> {
    tx: watch::Sender<T>,
}

impl<T> Observable<T> {
    pub fn new(value: T) -> Self {
        let (tx, _rx) = watch::channel(value);
        Self { tx }
    }

    /// Borrow the current value
    ///
    /// Do not hold the guard across an `.await`.
    pub fn get(&self) -> watch::Ref<'_, T> {
        self.tx.borrow()
    }

    /// Replace the value wholesale
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }
}

impl<T: Clone> Observable<T> {
    pub fn snapshot(&self) -> T {
        self.tx.borrow().clone()
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Observable").field(&*self.tx.borrow()).finish()
    }
}
