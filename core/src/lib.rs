//! Passage Core - host-agnostic building blocks.
//!
//! - `screen`: capability traits the host UI framework implements
//! - `history`: ordered navigation history for host containers
//! - `style`: transition and close style descriptors
//! - `schematic`: inspectable description of a configured node
//!
//! **IMPORTANT**: This layer never performs a transition by itself.

pub mod config;
pub mod error;
pub mod factory;
pub mod history;
pub mod schematic;
pub mod screen;
pub mod style;

pub use config::{ConfigError, LogFormat, ObserveConfig, PassageConfig, TransitionDefaults};
pub use error::{
    ContainerKind, FactoryError, LinkError, ResourceError, TransitionError, TransitionResult,
};
pub use factory::StoryboardFactory;
pub use history::NavigationHistory;
pub use schematic::{NodeKind, Schematic, TransitionKind};
pub use screen::{
    AsAnyRc, DestinationSlot, LinkReceiver, NavigationContainer, ResourceContainer, Screen,
    ScreenFactory, ScreenId, SplitContainer,
};
pub use style::{
    CloseTransitionStyle, ModalPresentationStyle, ModalStyle, ModalTransitionStyle,
    NavigationCloseStyle, NavigationStyle, SplitStyle, TransitionStyle,
};

pub mod prelude {
    pub use crate::error::{TransitionError, TransitionResult};
    pub use crate::factory::StoryboardFactory;
    pub use crate::screen::{
        NavigationContainer, ResourceContainer, Screen, ScreenFactory, ScreenId, SplitContainer,
    };
    pub use crate::style::{
        CloseTransitionStyle, ModalPresentationStyle, ModalStyle, ModalTransitionStyle,
        NavigationCloseStyle, NavigationStyle, SplitStyle, TransitionStyle,
    };
}
