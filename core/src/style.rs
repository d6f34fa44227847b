//! Style Descriptors
//!
//! Pure data describing *how* a transition or a close should happen.
//! Styles parameterize a node's default action; they never perform anything.

use crate::screen::ScreenId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a destination is brought on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionStyle {
    /// Presented from the originating screen.
    #[default]
    Default,
    /// Routed through the enclosing navigation stack.
    Navigation(NavigationStyle),
    /// Shown in the enclosing split container.
    Split(SplitStyle),
    /// Presented from the originating screen with a modal style applied first.
    Modal(ModalStyle),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationStyle {
    Push,
    Pop,
    Present,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitStyle {
    Detail,
    #[default]
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModalStyle {
    pub transition: ModalTransitionStyle,
    pub presentation: ModalPresentationStyle,
}

impl ModalStyle {
    pub fn new(transition: ModalTransitionStyle, presentation: ModalPresentationStyle) -> Self {
        Self {
            transition,
            presentation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalTransitionStyle {
    #[default]
    CoverVertical,
    FlipHorizontal,
    CrossDissolve,
    PartialCurl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalPresentationStyle {
    #[default]
    Automatic,
    FullScreen,
    PageSheet,
    FormSheet,
    CurrentContext,
    OverFullScreen,
    OverCurrentContext,
    Popover,
    Custom,
}

/// How a screen closes itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseTransitionStyle {
    /// Pop to the previous history entry, or dismiss.
    #[default]
    Default,
    Navigation(NavigationCloseStyle),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationCloseStyle {
    /// Pop to the history entry with this id.
    PopTo(ScreenId),
    /// Pop exactly one entry.
    SimplePop,
    /// Pop to the first entry.
    ToRoot,
    /// Pop to the newest entry matching the node's finder predicate.
    FoundPop,
}

impl fmt::Display for TransitionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionStyle::Default => write!(f, "default"),
            TransitionStyle::Navigation(NavigationStyle::Push) => write!(f, "navigation:push"),
            TransitionStyle::Navigation(NavigationStyle::Pop) => write!(f, "navigation:pop"),
            TransitionStyle::Navigation(NavigationStyle::Present) => {
                write!(f, "navigation:present")
            }
            TransitionStyle::Split(SplitStyle::Detail) => write!(f, "split:detail"),
            TransitionStyle::Split(SplitStyle::Default) => write!(f, "split:default"),
            TransitionStyle::Modal(_) => write!(f, "modal"),
        }
    }
}

impl fmt::Display for CloseTransitionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloseTransitionStyle::Default => write!(f, "default"),
            CloseTransitionStyle::Navigation(NavigationCloseStyle::PopTo(id)) => {
                write!(f, "navigation:pop_to({id})")
            }
            CloseTransitionStyle::Navigation(NavigationCloseStyle::SimplePop) => {
                write!(f, "navigation:simple_pop")
            }
            CloseTransitionStyle::Navigation(NavigationCloseStyle::ToRoot) => {
                write!(f, "navigation:to_root")
            }
            CloseTransitionStyle::Navigation(NavigationCloseStyle::FoundPop) => {
                write!(f, "navigation:found_pop")
            }
        }
    }
}
