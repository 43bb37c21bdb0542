//! Controlled / uncontrolled state
//!
//! A table value (sort, filter) is either owned by the table or mirrored
//! from an owner that receives every change request. The mode is fixed when
//! the slot is created.

use std::fmt;

use tracing::warn;

type ChangeFn<S> = Box<dyn Fn(&S) + Send + Sync>;

enum Mode<S> {
    /// The table holds the authoritative value
    Uncontrolled(S),
    /// The owner's last synced value is authoritative
    Controlled(S),
}

/// A value that is either table-owned or owner-controlled
pub struct StateSlot<S> {
    mode: Mode<S>,
    /// Owner callback of a controlled slot
    on_change: Option<ChangeFn<S>>,
    observers: Vec<ChangeFn<S>>,
}

impl<S> StateSlot<S> {
    /// Table-owned value seeded with `initial`
    pub fn uncontrolled(initial: S) -> Self {
        Self {
            mode: Mode::Uncontrolled(initial),
            on_change: None,
            observers: Vec::new(),
        }
    }

    /// Owner-controlled value; every change request goes to `on_change`
    pub fn controlled(value: S, on_change: impl Fn(&S) + Send + Sync + 'static) -> Self {
        Self {
            mode: Mode::Controlled(value),
            on_change: Some(Box::new(on_change)),
            observers: Vec::new(),
        }
    }

    /// Observe change requests. Observers run after the owner callback of a
    /// controlled slot and never replace it.
    pub fn with_observer(mut self, observer: impl Fn(&S) + Send + Sync + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self.mode, Mode::Controlled(_))
    }

    pub fn get(&self) -> &S {
        match &self.mode {
            Mode::Uncontrolled(value) | Mode::Controlled(value) => value,
        }
    }

    /// Request a change from user interaction.
    ///
    /// Returns true when the held value was replaced, which only happens in
    /// uncontrolled mode; a controlled slot waits for [`StateSlot::sync`].
    pub fn request(&mut self, next: S) -> bool {
        if let Some(on_change) = &self.on_change {
            on_change(&next);
        }
        for observer in &self.observers {
            observer(&next);
        }
        match &mut self.mode {
            Mode::Uncontrolled(value) => {
                *value = next;
                true
            }
            Mode::Controlled(_) => false,
        }
    }

    /// Accept a new value from the owner. Ignored in uncontrolled mode.
    pub fn sync(&mut self, value: S) -> bool {
        match &mut self.mode {
            Mode::Controlled(current) => {
                *current = value;
                true
            }
            Mode::Uncontrolled(_) => {
                warn!("Ignoring sync on an uncontrolled table state");
                false
            }
        }
    }
}

impl<S: Default> Default for StateSlot<S> {
    fn default() -> Self {
        Self::uncontrolled(S::default())
    }
}

impl<S: fmt::Debug> fmt::Debug for StateSlot<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateSlot")
            .field("controlled", &self.is_controlled())
            .field("value", self.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn uncontrolled_request_replaces_value() {
        let mut slot = StateSlot::uncontrolled(1);
        assert!(slot.request(2));
        assert_eq!(*slot.get(), 2);
        assert!(!slot.sync(3));
        assert_eq!(*slot.get(), 2);
    }

    #[test]
    fn uncontrolled_observer_sees_requests() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut slot = StateSlot::uncontrolled(0).with_observer(move |v: &i32| {
            sink.lock().expect("lock").push(*v);
        });
        slot.request(5);
        assert_eq!(*slot.get(), 5);
        assert_eq!(*seen.lock().expect("lock"), vec![5]);
    }

    #[test]
    fn controlled_request_only_forwards() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut slot = StateSlot::controlled(1, move |v: &i32| {
            sink.lock().expect("lock").push(*v);
        });

        assert!(!slot.request(2));
        assert_eq!(*slot.get(), 1);
        assert_eq!(*seen.lock().expect("lock"), vec![2]);

        assert!(slot.sync(2));
        assert_eq!(*slot.get(), 2);
    }

    #[test]
    fn observer_on_controlled_slot_keeps_owner_callback() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let owner = seen.clone();
        let observer = seen.clone();
        let mut slot = StateSlot::controlled(0, move |v: &i32| {
            owner.lock().expect("lock").push(("owner", *v));
        })
        .with_observer(move |v: &i32| {
            observer.lock().expect("lock").push(("observer", *v));
        });

        assert!(slot.is_controlled());
        assert!(!slot.request(4));
        assert_eq!(*slot.get(), 0);
        assert_eq!(*seen.lock().expect("lock"), vec![("owner", 4), ("observer", 4)]);
    }
}
