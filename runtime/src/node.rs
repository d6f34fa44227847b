//! # TransitionNode: a deferred, single-use transition
//!
//! A node is created by [`TransitionHandler`](crate::TransitionHandler) with
//! its default action already installed and nothing visible changed yet. The
//! caller configures it and then consumes it with [`TransitionNode::then`] or
//! [`TransitionNode::perform`].
//!
//! Execution order:
//!
//! 1. the origin is upgraded (it may have been released meanwhile),
//! 2. the destination is checked and cast to `T`,
//! 3. the containers the style needs are looked up,
//! 4. pre-link hooks, the default action and post-link hooks run in order,
//! 5. the caller's closure receives the typed destination.
//!
//! Steps 1-3 can fail; none of them touches visible state.

use crate::hooks::HookChain;
use crate::telemetry::{SpanFields, traced};
use passage_core::screen::{navigation_ancestor, short_type_name, split_ancestor};
use passage_core::{
    ContainerKind, ModalStyle, NavigationStyle, Screen, SplitStyle, TransitionError,
    TransitionKind, TransitionResult, TransitionStyle,
};
use passage_core::schematic::{NodeKind, Schematic};
use std::any::type_name;
use std::marker::PhantomData;
use std::rc::{Rc, Weak};
use uuid::Uuid;

/// A configured, not yet executed transition to a destination of type `T`.
///
/// Terminal operations take `self`, so a node runs at most once:
///
/// ```compile_fail
/// use passage_core::Screen;
/// use passage_runtime::TransitionNode;
/// use passage_test::{TestHost, TestScreen};
/// use std::rc::Rc;
///
/// let host = TestHost::new();
/// let home: Rc<dyn Screen> = host.screen::<()>("home");
/// let detail: Rc<dyn Screen> = host.screen::<()>("detail");
///
/// let node = TransitionNode::<TestScreen>::new(&home, Some(detail));
/// node.perform().unwrap();
/// node.perform().unwrap();
/// ```
pub struct TransitionNode<T> {
    id: Uuid,
    origin: Weak<dyn Screen>,
    destination: Option<Rc<dyn Screen>>,
    animated: bool,
    style: TransitionStyle,
    hooks: HookChain,
    _target: PhantomData<fn() -> T>,
}

impl<T: Screen> TransitionNode<T> {
    pub fn new(origin: &Rc<dyn Screen>, destination: Option<Rc<dyn Screen>>) -> Self {
        let id = Uuid::new_v4();
        tracing::trace!(
            node = %id,
            origin = %origin.id(),
            destination = ?destination.as_ref().map(|d| d.id()),
            "transition node created"
        );
        Self {
            id,
            origin: Rc::downgrade(origin),
            destination,
            animated: origin.transition_defaults().animated,
            style: TransitionStyle::Default,
            hooks: HookChain::new(),
            _target: PhantomData,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_animated(&self) -> bool {
        self.animated
    }

    pub fn style(&self) -> TransitionStyle {
        self.style
    }

    pub fn destination(&self) -> Option<&Rc<dyn Screen>> {
        self.destination.as_ref()
    }

    pub fn animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    /// Select how the default action presents the destination.
    pub fn to(mut self, style: TransitionStyle) -> Self {
        self.style = style;
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

    /// Describe the steps this node would run, without running them.
    pub fn schematic(&self) -> Schematic {
        let mut schematic = Schematic::new(self.id.to_string(), TransitionKind::Storyboard)
            .with_style(self.style, self.animated);
        schematic.push(NodeKind::Origin, origin_label(&self.origin));
        self.hooks
            .describe(&mut schematic, &format!("present:{}", self.style));
        schematic.push(
            NodeKind::Destination,
            self.destination
                .as_ref()
                .map_or("unresolved", |d| d.type_label()),
        );
        schematic
    }

    /// Run the transition and hand the typed destination to `f`.
    pub fn then<R>(self, f: impl FnOnce(Rc<T>) -> R) -> TransitionResult<R> {
        let TransitionNode {
            id,
            origin,
            destination,
            animated,
            style,
            hooks,
            ..
        } = self;

        let fields = SpanFields {
            id,
            kind: TransitionKind::Storyboard,
            style: &style,
            animated,
        };
        traced(fields, move || {
            let origin = origin.upgrade().ok_or(TransitionError::OriginReleased)?;
            let destination = destination.ok_or(TransitionError::NilDestination)?;
            let typed = downcast_destination::<T>(&destination)?;
            let presentation = Presentation::resolve(&origin, style)?;

            hooks.run(|| {
                presentation.apply(destination, animated);
                Ok(())
            })?;
            Ok(f(typed))
        })
    }

    /// Run the transition without inspecting the destination's type.
    pub fn perform(self) -> TransitionResult<()> {
        let TransitionNode {
            id,
            origin,
            destination,
            animated,
            style,
            hooks,
            ..
        } = self;

        let fields = SpanFields {
            id,
            kind: TransitionKind::Storyboard,
            style: &style,
            animated,
        };
        traced(fields, move || {
            let origin = origin.upgrade().ok_or(TransitionError::OriginReleased)?;
            let destination = destination.ok_or(TransitionError::NilDestination)?;
            let presentation = Presentation::resolve(&origin, style)?;

            hooks.run(|| {
                presentation.apply(destination, animated);
                Ok(())
            })
        })
    }
}

/// Recover the concrete destination type.
pub(crate) fn downcast_destination<T: Screen>(
    destination: &Rc<dyn Screen>,
) -> TransitionResult<Rc<T>> {
    let found = destination.type_label();
    destination
        .clone()
        .into_any_rc()
        .downcast::<T>()
        .map_err(|_| TransitionError::TypeMismatch {
            expected: short_type_name(type_name::<T>()),
            found,
        })
}

pub(crate) fn origin_label(origin: &Weak<dyn Screen>) -> &'static str {
    origin.upgrade().map_or("released", |o| o.type_label())
}

/// The default action of a node, with every container it needs resolved.
enum Presentation {
    Present {
        presenter: Rc<dyn Screen>,
    },
    Push {
        container: Rc<dyn Screen>,
    },
    PopTo {
        container: Rc<dyn Screen>,
    },
    Show {
        container: Rc<dyn Screen>,
    },
    ShowDetail {
        container: Rc<dyn Screen>,
    },
    Modal {
        presenter: Rc<dyn Screen>,
        style: ModalStyle,
    },
}

impl Presentation {
    fn resolve(origin: &Rc<dyn Screen>, style: TransitionStyle) -> TransitionResult<Self> {
        let navigation = || {
            navigation_ancestor(origin.as_ref())
                .ok_or(TransitionError::ContainerUnavailable(ContainerKind::Navigation))
        };
        let split = || {
            split_ancestor(origin.as_ref())
                .ok_or(TransitionError::ContainerUnavailable(ContainerKind::Split))
        };

        let presentation = match style {
            TransitionStyle::Default => Presentation::Present {
                presenter: origin.clone(),
            },
            TransitionStyle::Navigation(NavigationStyle::Push) => Presentation::Push {
                container: navigation()?,
            },
            TransitionStyle::Navigation(NavigationStyle::Pop) => Presentation::PopTo {
                container: navigation()?,
            },
            TransitionStyle::Navigation(NavigationStyle::Present) => Presentation::Present {
                presenter: navigation()?,
            },
            TransitionStyle::Split(SplitStyle::Detail) => Presentation::ShowDetail {
                container: split()?,
            },
            TransitionStyle::Split(SplitStyle::Default) => Presentation::Show {
                container: split()?,
            },
            TransitionStyle::Modal(style) => Presentation::Modal {
                presenter: origin.clone(),
                style,
            },
        };
        Ok(presentation)
    }

    fn apply(self, destination: Rc<dyn Screen>, animated: bool) {
        match self {
            Presentation::Present { presenter } => presenter.present(destination, animated),
            Presentation::Push { container } => {
                if let Some(navigation) = container.as_navigation() {
                    navigation.push_child(destination, animated);
                }
            }
            Presentation::PopTo { container } => {
                if let Some(navigation) = container.as_navigation() {
                    navigation.pop_to_child(&destination, animated);
                }
            }
            Presentation::Show { container } => {
                if let Some(split) = container.as_split() {
                    split.show(destination, animated);
                }
            }
            Presentation::ShowDetail { container } => {
                if let Some(split) = container.as_split() {
                    split.show_detail(destination, animated);
                }
            }
            Presentation::Modal { presenter, style } => {
                destination.apply_modal_style(style);
                presenter.present(destination, animated);
            }
        }
    }
}
