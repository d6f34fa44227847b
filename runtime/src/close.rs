//! # CloseTransitionNode: leaving the current screen
//!
//! Which close applies is decided when the node is triggered, from the shape
//! of the origin's navigation history at that moment:
//!
//! * inside a navigation container with more than one entry, pop within it
//!   (target chosen by the [`CloseTransitionStyle`]);
//! * inside a single-entry navigation container, or presented modally,
//!   dismiss the origin;
//! * otherwise there is nothing to close to and nothing happens.

use crate::hooks::HookChain;
use crate::node::origin_label;
use crate::telemetry::{SpanFields, traced};
use passage_core::schematic::{NodeKind, Schematic};
use passage_core::{
    CloseTransitionStyle, NavigationCloseStyle, Screen, ScreenId, TransitionError, TransitionKind,
    TransitionResult,
};
use serde::{Deserialize, Serialize};
use std::rc::{Rc, Weak};
use uuid::Uuid;

/// Predicate used by [`NavigationCloseStyle::FoundPop`].
pub type CloseFinder = Box<dyn Fn(&dyn Screen) -> bool>;

/// What a triggered close did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CloseResolution {
    PoppedTo {
        container: ScreenId,
        target: ScreenId,
    },
    PoppedOne {
        container: ScreenId,
    },
    PoppedToRoot {
        container: ScreenId,
    },
    Dismissed {
        screen: ScreenId,
    },
    Nothing,
}

impl CloseResolution {
    /// Whether the close changed what is on screen.
    pub fn is_visible(&self) -> bool {
        !matches!(self, CloseResolution::Nothing)
    }
}

/// A configured, not yet executed close of the origin screen.
pub struct CloseTransitionNode {
    id: Uuid,
    origin: Weak<dyn Screen>,
    style: CloseTransitionStyle,
    finder: Option<CloseFinder>,
    animated: bool,
    hooks: HookChain,
}

impl CloseTransitionNode {
    pub fn new(origin: &Rc<dyn Screen>) -> Self {
        let id = Uuid::new_v4();
        tracing::trace!(node = %id, origin = %origin.id(), "close node created");
        Self {
            id,
            origin: Rc::downgrade(origin),
            style: CloseTransitionStyle::Default,
            finder: None,
            animated: origin.transition_defaults().animated,
            hooks: HookChain::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn style(&self) -> CloseTransitionStyle {
        self.style
    }

    pub fn is_animated(&self) -> bool {
        self.animated
    }

    pub fn animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    pub fn preferred(mut self, style: CloseTransitionStyle) -> Self {
        self.style = style;
        self
    }

    /// Pop to the most recent history entry matching `finder`.
    pub fn find_pop(mut self, finder: impl Fn(&dyn Screen) -> bool + 'static) -> Self {
        self.finder = Some(Box::new(finder));
        self.style = CloseTransitionStyle::Navigation(NavigationCloseStyle::FoundPop);
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
        let mut schematic = Schematic::new(self.id.to_string(), TransitionKind::Close)
            .with_style(self.style, self.animated);
        schematic.push(NodeKind::Origin, origin_label(&self.origin));
        self.hooks
            .describe(&mut schematic, &format!("close:{}", self.style));
        schematic
    }

    /// Resolve and perform the close.
    ///
    /// Target lookup failures are reported before any hook runs.
    pub fn trigger(self) -> TransitionResult<CloseResolution> {
        let CloseTransitionNode {
            id,
            origin,
            style,
            finder,
            animated,
            hooks,
        } = self;

        let fields = SpanFields {
            id,
            kind: TransitionKind::Close,
            style: &style,
            animated,
        };
        traced(fields, move || {
            let origin = origin.upgrade().ok_or(TransitionError::OriginReleased)?;
            let plan = ClosePlan::resolve(&origin, style, finder.as_deref())?;
            tracing::debug!(plan = plan.label(), "close resolved");

            hooks.run(|| Ok(plan.apply(animated)))
        })
    }
}

/// A close with every screen it touches already looked up.
enum ClosePlan {
    PopTo {
        container: Rc<dyn Screen>,
        target: Rc<dyn Screen>,
    },
    PopOne {
        container: Rc<dyn Screen>,
    },
    PopToRoot {
        container: Rc<dyn Screen>,
    },
    Dismiss {
        screen: Rc<dyn Screen>,
    },
    Nothing,
}

impl ClosePlan {
    fn resolve(
        origin: &Rc<dyn Screen>,
        style: CloseTransitionStyle,
        finder: Option<&dyn Fn(&dyn Screen) -> bool>,
    ) -> TransitionResult<Self> {
        let container = origin
            .parent()
            .filter(|parent| parent.as_navigation().is_some());

        if let Some(container) = container {
            let history = container
                .as_navigation()
                .map(|navigation| navigation.history())
                .unwrap_or_default();
            if history.len() <= 1 {
                return Ok(ClosePlan::Dismiss {
                    screen: origin.clone(),
                });
            }

            let plan = match style {
                CloseTransitionStyle::Default => {
                    // One before the origin; the origin may not be the newest entry.
                    let index = match history.iter().position(|s| s.id() == origin.id()) {
                        Some(0) => {
                            return Ok(ClosePlan::Dismiss {
                                screen: origin.clone(),
                            });
                        }
                        Some(position) => position - 1,
                        None => history.len() - 2,
                    };
                    ClosePlan::PopTo {
                        target: history[index].clone(),
                        container,
                    }
                }
                CloseTransitionStyle::Navigation(NavigationCloseStyle::SimplePop) => {
                    ClosePlan::PopOne { container }
                }
                CloseTransitionStyle::Navigation(NavigationCloseStyle::ToRoot) => {
                    ClosePlan::PopToRoot { container }
                }
                CloseTransitionStyle::Navigation(NavigationCloseStyle::PopTo(id)) => {
                    let target = history
                        .iter()
                        .find(|screen| screen.id() == id)
                        .cloned()
                        .ok_or(TransitionError::TargetNotFound)?;
                    ClosePlan::PopTo { container, target }
                }
                CloseTransitionStyle::Navigation(NavigationCloseStyle::FoundPop) => {
                    let finder = finder.ok_or(TransitionError::TargetNotFound)?;
                    let target = history
                        .iter()
                        .rev()
                        .find(|&screen| finder(&**screen))
                        .cloned()
                        .ok_or(TransitionError::TargetNotFound)?;
                    ClosePlan::PopTo { container, target }
                }
            };
            return Ok(plan);
        }

        if origin.presenting_screen().is_some() {
            return Ok(ClosePlan::Dismiss {
                screen: origin.clone(),
            });
        }
        Ok(ClosePlan::Nothing)
    }

    fn label(&self) -> &'static str {
        match self {
            ClosePlan::PopTo { .. } => "pop_to",
            ClosePlan::PopOne { .. } => "pop_one",
            ClosePlan::PopToRoot { .. } => "pop_to_root",
            ClosePlan::Dismiss { .. } => "dismiss",
            ClosePlan::Nothing => "nothing",
        }
    }

    fn apply(self, animated: bool) -> CloseResolution {
        match self {
            ClosePlan::PopTo { container, target } => {
                if let Some(navigation) = container.as_navigation() {
                    navigation.pop_to_child(&target, animated);
                }
                CloseResolution::PoppedTo {
                    container: container.id(),
                    target: target.id(),
                }
            }
            ClosePlan::PopOne { container } => {
                if let Some(navigation) = container.as_navigation() {
                    navigation.pop_child(animated);
                }
                CloseResolution::PoppedOne {
                    container: container.id(),
                }
            }
            ClosePlan::PopToRoot { container } => {
                if let Some(navigation) = container.as_navigation() {
                    navigation.pop_to_root(animated);
                }
                CloseResolution::PoppedToRoot {
                    container: container.id(),
                }
            }
            ClosePlan::Dismiss { screen } => {
                screen.dismiss(animated);
                CloseResolution::Dismissed {
                    screen: screen.id(),
                }
            }
            ClosePlan::Nothing => CloseResolution::Nothing,
        }
    }
}
