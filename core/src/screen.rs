//! Screen - Host Capability Surface
//!
//! Passage never creates, renders or destroys screens. The host UI framework
//! owns them and exposes the few relationships and primitive actions the
//! transition layer needs through the traits in this module.
//!
//! # Philosophy
//! > Capabilities are queried, never assumed.
//!
//! A screen that lives in a navigation stack answers `as_navigation()` on its
//! parent; nothing is force-cast.

use crate::config::TransitionDefaults;
use crate::error::{FactoryError, LinkError, ResourceError};
use crate::style::ModalStyle;
use serde::{Deserialize, Serialize};
use std::any::{Any, type_name};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use uuid::Uuid;

/// Stable identity of a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScreenId(Uuid);

impl ScreenId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ScreenId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ScreenId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Upcast helper so `Rc<dyn Screen>` can be recovered as `Rc<T>`.
///
/// Blanket-implemented for every `'static` type; hosts never implement it.
pub trait AsAnyRc {
    fn into_any_rc(self: Rc<Self>) -> Rc<dyn Any>;
}

impl<T: Any> AsAnyRc for T {
    fn into_any_rc(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }
}

/// A displayed unit of UI, owned by the host.
pub trait Screen: AsAnyRc + 'static {
    fn id(&self) -> ScreenId;

    /// Readable name of the concrete screen type, used in errors and logs.
    fn type_label(&self) -> &'static str {
        short_type_name(type_name::<Self>())
    }

    /// The container this screen is embedded in, if any.
    fn parent(&self) -> Option<Rc<dyn Screen>>;

    /// The screen that presented this one modally, if any.
    fn presenting_screen(&self) -> Option<Rc<dyn Screen>>;

    /// Resource container (storyboard) this screen was instantiated from.
    fn resources(&self) -> Option<Rc<dyn ResourceContainer>> {
        None
    }

    fn present(&self, destination: Rc<dyn Screen>, animated: bool);

    fn dismiss(&self, animated: bool);

    /// Applied to a destination before it is presented modally.
    fn apply_modal_style(&self, _style: ModalStyle) {}

    /// Fire the link wired under `identifier`.
    ///
    /// The host must hand the freshly created destination to `receiver`
    /// before returning.
    fn perform_link(
        &self,
        _identifier: &str,
        _animated: bool,
        _receiver: LinkReceiver,
    ) -> Result<(), LinkError> {
        Err(LinkError::Unsupported)
    }

    fn as_navigation(&self) -> Option<&dyn NavigationContainer> {
        None
    }

    fn as_split(&self) -> Option<&dyn SplitContainer> {
        None
    }

    fn transition_defaults(&self) -> TransitionDefaults {
        TransitionDefaults::default()
    }
}

/// A screen that owns an ordered history of child screens.
pub trait NavigationContainer {
    /// Snapshot of the history, oldest first.
    fn history(&self) -> Vec<Rc<dyn Screen>>;

    fn push_child(&self, screen: Rc<dyn Screen>, animated: bool);

    fn pop_child(&self, animated: bool) -> Option<Rc<dyn Screen>>;

    fn pop_to_child(&self, screen: &Rc<dyn Screen>, animated: bool);

    fn pop_to_root(&self, animated: bool);
}

/// A screen showing a primary and a detail pane.
pub trait SplitContainer {
    fn show(&self, screen: Rc<dyn Screen>, animated: bool);

    fn show_detail(&self, screen: Rc<dyn Screen>, animated: bool);
}

/// Instantiates screens by identifier (a storyboard).
pub trait ResourceContainer {
    fn instantiate(&self, identifier: &str) -> Result<Rc<dyn Screen>, ResourceError>;

    fn instantiate_initial(&self) -> Result<Rc<dyn Screen>, ResourceError> {
        Err(ResourceError::NoInitialScreen)
    }
}

/// Caller-supplied source of destination screens.
pub trait ScreenFactory {
    fn instantiate_handler(&self) -> Result<Rc<dyn Screen>, FactoryError>;
}

impl<F> ScreenFactory for F
where
    F: Fn() -> Result<Rc<dyn Screen>, FactoryError>,
{
    fn instantiate_handler(&self) -> Result<Rc<dyn Screen>, FactoryError> {
        self()
    }
}

/// Shared slot a link destination is written into.
pub type DestinationSlot = Rc<RefCell<Option<Rc<dyn Screen>>>>;

/// One-shot handle the host uses to report a link's destination.
///
/// Holds only a weak reference to the pending node's slot, so keeping a
/// receiver around never keeps a discarded node alive.
#[derive(Clone)]
pub struct LinkReceiver {
    slot: Weak<RefCell<Option<Rc<dyn Screen>>>>,
}

impl LinkReceiver {
    pub fn new(slot: &DestinationSlot) -> Self {
        Self {
            slot: Rc::downgrade(slot),
        }
    }

    /// Store the destination. Returns `false` if the node is already gone.
    pub fn deliver(&self, destination: Rc<dyn Screen>) -> bool {
        match self.slot.upgrade() {
            Some(slot) => {
                tracing::trace!(destination = %destination.id(), "link destination delivered");
                *slot.borrow_mut() = Some(destination);
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.slot.upgrade().is_some()
    }
}

impl fmt::Debug for LinkReceiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkReceiver")
            .field("pending", &self.is_pending())
            .finish()
    }
}

/// Nearest ancestor of `screen` (excluding itself) that is a navigation container.
pub fn navigation_ancestor(screen: &dyn Screen) -> Option<Rc<dyn Screen>> {
    let mut current = screen.parent();
    while let Some(candidate) = current {
        if candidate.as_navigation().is_some() {
            return Some(candidate);
        }
        current = candidate.parent();
    }
    None
}

/// Nearest ancestor of `screen` (excluding itself) that is a split container.
pub fn split_ancestor(screen: &dyn Screen) -> Option<Rc<dyn Screen>> {
    let mut current = screen.parent();
    while let Some(candidate) = current {
        if candidate.as_split().is_some() {
            return Some(candidate);
        }
        current = candidate.parent();
    }
    None
}

/// Extract the final identifier from a type path, keeping generic arguments
/// readable (e.g. "TestScreen<Detail>" from "passage_test::TestScreen<app::Detail>").
pub fn short_type_name(full: &'static str) -> &'static str {
    let head = full.split('<').next().unwrap_or(full);
    match head.rfind("::") {
        Some(idx) => &full[idx + 2..],
        None => full,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("a::b::Detail"), "Detail");
        assert_eq!(short_type_name("Detail"), "Detail");
        assert_eq!(
            short_type_name("passage_test::TestScreen<app::Detail>"),
            "TestScreen<app::Detail>"
        );
    }

    #[test]
    fn test_receiver_reports_dropped_slot() {
        let slot: DestinationSlot = Rc::new(RefCell::new(None));
        let receiver = LinkReceiver::new(&slot);
        assert!(receiver.is_pending());
        drop(slot);
        assert!(!receiver.is_pending());
    }

    #[test]
    fn test_screen_ids_are_unique() {
        assert_ne!(ScreenId::new(), ScreenId::new());
    }
}
