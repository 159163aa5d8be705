//! Observable state cells.
//!
//! A [`Published`] value is owned by the UI context and observed by any
//! number of `watch::Receiver`s. Writers decide whether a write is a change;
//! receivers are only woken for real changes.

use tokio::sync::watch;

#[derive(Debug)]
pub struct Published<T> {
    sender: watch::Sender<T>,
}

impl<T> Published<T> {
    pub fn new(value: T) -> Self {
        let (sender, _) = watch::channel(value);
        Self { sender }
    }

    pub fn borrow(&self) -> watch::Ref<'_, T> {
        self.sender.borrow()
    }

    /// Returns a receiver that has already seen the current value.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }

    /// Mutates in place and always notifies.
    pub fn modify<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        self.sender.send_modify(f);
    }

    /// Mutates in place and notifies only when `f` reports a change.
    pub fn modify_if<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut T) -> bool,
    {
        self.sender.send_if_modified(f)
    }
}

impl<T: Clone> Published<T> {
    pub fn get(&self) -> T {
        self.sender.borrow().clone()
    }
}

impl<T: PartialEq> Published<T> {
    /// Replaces the value if it differs by value. Returns whether it changed.
    pub fn set_if_changed(&self, value: T) -> bool {
        self.sender.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        })
    }
}

impl<T: Default> Default for Published<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_if_changed_skips_equal_values() {
        let cell = Published::new(vec![1, 2]);
        let mut rx = cell.subscribe();

        assert!(!cell.set_if_changed(vec![1, 2]));
        assert!(!rx.has_changed().unwrap());

        assert!(cell.set_if_changed(vec![1, 2, 3]));
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), vec![1, 2, 3]);
    }

    #[test]
    fn test_modify_without_receivers() {
        let cell = Published::new(0usize);
        cell.modify(|v| *v += 5);
        assert_eq!(cell.get(), 5);
    }

    #[test]
    fn test_modify_if_reports_change() {
        let cell = Published::new(false);
        assert!(!cell.modify_if(|_| false));
        assert!(cell.modify_if(|v| {
            *v = true;
            true
        }));
        assert!(cell.get());
    }
}
