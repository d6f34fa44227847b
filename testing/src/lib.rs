//! Passage Test - an in-memory host for exercising transitions.
//!
//! Every primitive the transition layer calls on the host (present, dismiss,
//! push, pop, link...) is recorded as a [`HostEvent`] in a shared [`HostLog`],
//! so tests assert on *what became visible* and in which order.
//!
//! ```rust
//! use passage_test::{HostEvent, TestHost};
//!
//! struct Home;
//! let host = TestHost::new();
//! let home = host.screen::<Home>("home");
//! let stack = host.navigation_stack("nav");
//! stack.adopt(&home);
//!
//! assert_eq!(stack.depth(), 1);
//! assert!(host.log().is_empty());
//! ```

mod containers;
mod screen;
mod storyboard;

pub use containers::{TestNavigationStack, TestSplitView};
pub use screen::TestScreen;
pub use storyboard::TestStoryboard;

use passage_core::{ModalStyle, Screen, ScreenId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// A primitive action the host performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Presented {
        by: ScreenId,
        screen: ScreenId,
        animated: bool,
    },
    Dismissed {
        screen: ScreenId,
        animated: bool,
    },
    ModalStyleApplied {
        screen: ScreenId,
        style: ModalStyle,
    },
    Pushed {
        container: ScreenId,
        screen: ScreenId,
        animated: bool,
    },
    Popped {
        container: ScreenId,
        screen: Option<ScreenId>,
        animated: bool,
    },
    PoppedTo {
        container: ScreenId,
        screen: ScreenId,
        animated: bool,
    },
    PoppedToRoot {
        container: ScreenId,
        animated: bool,
    },
    Shown {
        container: ScreenId,
        screen: ScreenId,
        animated: bool,
    },
    ShownDetail {
        container: ScreenId,
        screen: ScreenId,
        animated: bool,
    },
    LinkPerformed {
        origin: ScreenId,
        identifier: String,
        animated: bool,
    },
    /// A caller hook ran (see [`TestHost::hook`]).
    Hook(String),
}

impl HostEvent {
    /// Whether the event changed what is on screen.
    pub fn is_visible(&self) -> bool {
        !matches!(self, HostEvent::Hook(_))
    }

    pub fn is_pop(&self) -> bool {
        matches!(
            self,
            HostEvent::Popped { .. } | HostEvent::PoppedTo { .. } | HostEvent::PoppedToRoot { .. }
        )
    }

    pub fn is_dismiss(&self) -> bool {
        matches!(self, HostEvent::Dismissed { .. })
    }
}

/// Shared, append-only record of host events.
///
/// It also carries the parent links containers maintain for the screens they
/// embed, since every test screen of one host shares it.
#[derive(Debug, Clone, Default)]
pub struct HostLog {
    events: Rc<RefCell<Vec<HostEvent>>>,
    parents: Rc<RefCell<HashMap<ScreenId, Weak<dyn Screen>>>>,
}

impl HostLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The container `child` is currently embedded in.
    pub fn parent_of(&self, child: ScreenId) -> Option<Rc<dyn Screen>> {
        self.parents.borrow().get(&child).and_then(Weak::upgrade)
    }

    pub(crate) fn attach(&self, child: ScreenId, parent: Weak<dyn Screen>) {
        self.parents.borrow_mut().insert(child, parent);
    }

    pub(crate) fn detach(&self, child: ScreenId) {
        self.parents.borrow_mut().remove(&child);
    }

    pub fn record(&self, event: HostEvent) {
        tracing::trace!(?event, "host event");
        self.events.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<HostEvent> {
        self.events.borrow().clone()
    }

    /// Events that changed what is on screen (hooks excluded).
    pub fn visible(&self) -> Vec<HostEvent> {
        self.events
            .borrow()
            .iter()
            .filter(|e| e.is_visible())
            .cloned()
            .collect()
    }

    /// Names of the hooks that ran, in order.
    pub fn hooks(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                HostEvent::Hook(name) => Some(name.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, predicate: impl Fn(&HostEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| predicate(e)).count()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

/// Factory for test screens sharing one [`HostLog`].
#[derive(Debug, Clone, Default)]
pub struct TestHost {
    log: HostLog,
}

impl TestHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> &HostLog {
        &self.log
    }

    /// A plain screen. `M` is a marker type distinguishing screen kinds, so
    /// `TestScreen<Detail>` and `TestScreen<Settings>` downcast differently.
    pub fn screen<M: 'static>(&self, label: &str) -> Rc<TestScreen<M>> {
        Rc::new(TestScreen::new(label, self.log.clone()))
    }

    pub fn navigation_stack(&self, label: &str) -> Rc<TestNavigationStack> {
        TestNavigationStack::new(label, self.log.clone())
    }

    pub fn split_view(&self, label: &str) -> Rc<TestSplitView> {
        TestSplitView::new(label, self.log.clone())
    }

    pub fn storyboard(&self) -> Rc<TestStoryboard> {
        Rc::new(TestStoryboard::new(self.log.clone()))
    }

    /// A hook that records `HostEvent::Hook(name)` when it runs.
    pub fn hook(&self, name: &str) -> impl FnOnce() + 'static {
        let log = self.log.clone();
        let name = name.to_string();
        move || log.record(HostEvent::Hook(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hooks_are_recorded_in_order() {
        let host = TestHost::new();
        let first = host.hook("first");
        let second = host.hook("second");
        second();
        first();
        assert_eq!(host.log().hooks(), vec!["second", "first"]);
        assert!(host.log().visible().is_empty());
    }

    #[test]
    fn test_clear() {
        let host = TestHost::new();
        host.hook("x")();
        assert_eq!(host.log().len(), 1);
        host.log().clear();
        assert!(host.log().is_empty());
    }
}
