//! # SegueTransitionNode: a transition through a host-wired link
//!
//! The destination does not exist until the link fires. The host creates it
//! and reports it synchronously through the [`LinkReceiver`] handed to
//! [`Screen::perform_link`], before the node casts it to `T`.

use crate::hooks::HookChain;
use crate::node::{downcast_destination, origin_label};
use crate::telemetry::{SpanFields, traced};
use passage_core::schematic::{NodeKind, Schematic};
use passage_core::{
    DestinationSlot, LinkReceiver, Screen, TransitionError, TransitionKind, TransitionResult,
};
use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;
use std::rc::{Rc, Weak};
use uuid::Uuid;

/// A configured, not yet executed link transition to a destination of type `T`.
pub struct SegueTransitionNode<T> {
    id: Uuid,
    origin: Weak<dyn Screen>,
    identifier: String,
    animated: bool,
    slot: DestinationSlot,
    hooks: HookChain,
    _target: PhantomData<fn() -> T>,
}

impl<T: Screen> SegueTransitionNode<T> {
    pub fn new(origin: &Rc<dyn Screen>, identifier: impl Into<String>) -> Self {
        let id = Uuid::new_v4();
        let identifier = identifier.into();
        tracing::trace!(
            node = %id,
            origin = %origin.id(),
            link = %identifier,
            "segue node created"
        );
        Self {
            id,
            origin: Rc::downgrade(origin),
            identifier,
            animated: origin.transition_defaults().animated,
            slot: Rc::new(RefCell::new(None)),
            hooks: HookChain::new(),
            _target: PhantomData,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn link_identifier(&self) -> &str {
        &self.identifier
    }

    pub fn is_animated(&self) -> bool {
        self.animated
    }

    /// A handle the host can use to report the destination.
    ///
    /// The handle does not keep the node alive.
    pub fn receiver(&self) -> LinkReceiver {
        LinkReceiver::new(&self.slot)
    }

    /// The destination reported so far, if any.
    pub fn destination(&self) -> Option<Rc<dyn Screen>> {
        self.slot.borrow().clone()
    }

    pub fn with_link_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }

    pub fn animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    pub fn add_pre_link_action(mut self, action: impl FnOnce() + 'static) -> Self {
        self.hooks.push_pre_link(Box::new(action));
        self
    }

    pub fn add_post_link_action(mut self, action: impl FnOnce() + 'static) -> Self {
        self.hooks.push_post_link(Box::new(action));
        self
    }

    pub fn schematic(&self) -> Schematic {
        let mut schematic = Schematic::new(self.id.to_string(), TransitionKind::Segue)
            .with_style(LinkStyle(&self.identifier), self.animated);
        schematic.push(NodeKind::Origin, origin_label(&self.origin));
        self.hooks
            .describe(&mut schematic, &format!("link:{}", self.identifier));
        schematic.push(
            NodeKind::Destination,
            self.slot
                .borrow()
                .as_ref()
                .map_or("pending", |d| d.type_label()),
        );
        schematic
    }

    /// Fire the link and hand the typed destination to `f`.
    ///
    /// The destination is only known once the link has fired, so a
    /// `TypeMismatch` here is reported after the host has shown it.
    pub fn then<R>(self, f: impl FnOnce(Rc<T>) -> R) -> TransitionResult<R> {
        let id = self.id;
        let animated = self.animated;
        let style = LinkStyle(&self.identifier).to_string();
        let fields = SpanFields {
            id,
            kind: TransitionKind::Segue,
            style: &style,
            animated,
        };
        traced(fields, move || {
            let slot = self.slot.clone();
            self.fire()?;

            let destination = slot
                .borrow_mut()
                .take()
                .ok_or(TransitionError::NilDestination)?;
            let typed = downcast_destination::<T>(&destination)?;
            Ok(f(typed))
        })
    }

    /// Fire the link and run the hooks without waiting for a destination.
    pub fn perform(self) -> TransitionResult<()> {
        let animated = self.animated;
        let style = LinkStyle(&self.identifier).to_string();
        let fields = SpanFields {
            id: self.id,
            kind: TransitionKind::Segue,
            style: &style,
            animated,
        };
        traced(fields, move || self.fire())
    }

    fn fire(self) -> TransitionResult<()> {
        let SegueTransitionNode {
            origin,
            identifier,
            animated,
            slot,
            hooks,
            ..
        } = self;

        let origin = origin.upgrade().ok_or(TransitionError::OriginReleased)?;
        if identifier.is_empty() {
            return Err(TransitionError::MissingLinkIdentifier);
        }

        hooks.run(|| {
            origin
                .perform_link(&identifier, animated, LinkReceiver::new(&slot))
                .map_err(|source| TransitionError::LinkFailed {
                    identifier: identifier.clone(),
                    source,
                })
        })
    }
}

struct LinkStyle<'a>(&'a str);

impl fmt::Display for LinkStyle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "link:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use passage_core::LinkError;
    use passage_test::{HostEvent, TestHost, TestScreen};
    use std::cell::Cell;

    struct Home;
    struct Detail;
    struct Settings;

    fn home_with_detail_link(host: &TestHost) -> Rc<TestScreen<Home>> {
        let home = host.screen::<Home>("home");
        let log = host.log().clone();
        home.wire_link("showDetail", move || {
            Rc::new(TestScreen::<Detail>::new("detail", log.clone())) as Rc<dyn Screen>
        });
        home
    }

    #[test]
    fn test_then_receives_linked_destination() {
        let host = TestHost::new();
        let home: Rc<dyn Screen> = home_with_detail_link(&host);

        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        let label = SegueTransitionNode::<TestScreen<Detail>>::new(&home, "showDetail")
            .add_pre_link_action(host.hook("pre"))
            .add_post_link_action(host.hook("post"))
            .then(move |detail| {
                seen.set(seen.get() + 1);
                detail.label().to_string()
            })
            .unwrap();

        assert_eq!(label, "detail");
        assert_eq!(calls.get(), 1);

        let events = host.log().events();
        assert_eq!(events.first(), Some(&HostEvent::Hook("pre".into())));
        assert_eq!(
            events[1],
            HostEvent::LinkPerformed {
                origin: home.id(),
                identifier: "showDetail".into(),
                animated: true,
            }
        );
        assert_eq!(events.last(), Some(&HostEvent::Hook("post".into())));
    }

    #[test]
    fn test_empty_identifier_fails_before_side_effects() {
        let host = TestHost::new();
        let home: Rc<dyn Screen> = home_with_detail_link(&host);

        let err = SegueTransitionNode::<TestScreen<Detail>>::new(&home, "")
            .add_pre_link_action(host.hook("pre"))
            .then(|_| ())
            .unwrap_err();

        assert!(matches!(err, TransitionError::MissingLinkIdentifier));
        assert!(host.log().is_empty());
    }

    #[test]
    fn test_identifier_can_be_set_later() {
        let host = TestHost::new();
        let home: Rc<dyn Screen> = home_with_detail_link(&host);

        let node = SegueTransitionNode::<TestScreen<Detail>>::new(&home, "");
        let node = node.with_link_identifier("showDetail");
        assert_eq!(node.link_identifier(), "showDetail");
        assert!(node.then(|_| ()).is_ok());
    }

    #[test]
    fn test_nothing_delivered_is_nil_destination() {
        let host = TestHost::new();
        let home = host.screen::<Home>("home");
        home.wire_silent_link("showDetail");
        let home: Rc<dyn Screen> = home;

        let err = SegueTransitionNode::<TestScreen<Detail>>::new(&home, "showDetail")
            .then(|_| ())
            .unwrap_err();

        assert!(matches!(err, TransitionError::NilDestination));
    }

    #[test]
    fn test_perform_does_not_require_destination() {
        let host = TestHost::new();
        let home = host.screen::<Home>("home");
        home.wire_silent_link("logout");
        let home: Rc<dyn Screen> = home;

        SegueTransitionNode::<TestScreen<Detail>>::new(&home, "logout")
            .animated(false)
            .perform()
            .unwrap();

        assert_eq!(
            host.log().events(),
            vec![HostEvent::LinkPerformed {
                origin: home.id(),
                identifier: "logout".into(),
                animated: false,
            }]
        );
    }

    #[test]
    fn test_wrong_destination_type() {
        let host = TestHost::new();
        let home: Rc<dyn Screen> = home_with_detail_link(&host);

        let err = SegueTransitionNode::<TestScreen<Settings>>::new(&home, "showDetail")
            .then(|_| ())
            .unwrap_err();

        assert!(matches!(err, TransitionError::TypeMismatch { .. }));
    }

    #[test]
    fn test_unknown_link_is_reported() {
        let host = TestHost::new();
        let home: Rc<dyn Screen> = host.screen::<Home>("home");

        let err = SegueTransitionNode::<TestScreen<Detail>>::new(&home, "missing")
            .add_post_link_action(host.hook("post"))
            .then(|_| ())
            .unwrap_err();

        match err {
            TransitionError::LinkFailed { identifier, source } => {
                assert_eq!(identifier, "missing");
                assert_eq!(
                    source,
                    LinkError::Unknown {
                        identifier: "missing".into()
                    }
                );
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(host.log().hooks().is_empty());
    }

    #[test]
    fn test_receiver_outlives_node_safely() {
        let host = TestHost::new();
        let home: Rc<dyn Screen> = home_with_detail_link(&host);

        let node = SegueTransitionNode::<TestScreen<Detail>>::new(&home, "showDetail");
        let receiver = node.receiver();
        assert!(receiver.is_pending());

        let early = host.screen::<Detail>("early");
        assert!(receiver.deliver(early.clone()));
        assert_eq!(node.destination().map(|d| d.id()), Some(early.id()));

        drop(node);
        assert!(!receiver.is_pending());
        assert!(!receiver.deliver(early));
    }

    #[test]
    fn test_released_origin() {
        let host = TestHost::new();
        let home: Rc<dyn Screen> = home_with_detail_link(&host);

        let node = SegueTransitionNode::<TestScreen<Detail>>::new(&home, "showDetail")
            .add_pre_link_action(host.hook("pre"));
        drop(home);

        assert!(matches!(
            node.then(|_| ()),
            Err(TransitionError::OriginReleased)
        ));
        assert!(host.log().is_empty());
    }

    #[test]
    fn test_schematic() {
        let host = TestHost::new();
        let home: Rc<dyn Screen> = home_with_detail_link(&host);

        let schematic = SegueTransitionNode::<TestScreen<Detail>>::new(&home, "showDetail")
            .add_post_link_action(|| {})
            .schematic();

        assert_eq!(schematic.kind, TransitionKind::Segue);
        assert_eq!(schematic.steps(), vec!["link:showDetail", "post-link #1"]);
        assert_eq!(schematic.nodes.last().map(|n| n.label.as_str()), Some("pending"));
        assert!(host.log().is_empty());
    }
}
