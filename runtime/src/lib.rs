//! Passage Runtime - transition nodes and the capability that creates them.
//!
//! A screen asks for a transition through [`TransitionHandler`], configures
//! the returned node, then consumes it:
//!
//! ```rust
//! use passage_core::{NavigationStyle, TransitionStyle};
//! use passage_runtime::prelude::*;
//! use passage_test::{TestHost, TestScreen};
//!
//! struct Home;
//! struct Detail;
//!
//! let host = TestHost::new();
//! let storyboard = host.storyboard();
//! storyboard.register_screen::<Detail>("Detail");
//!
//! let stack = host.navigation_stack("nav");
//! let home = host.screen::<Home>("home");
//! home.set_resources(storyboard);
//! stack.adopt(&home);
//!
//! let label = home
//!     .for_current_storyboard::<TestScreen<Detail>>("Detail")?
//!     .to(TransitionStyle::Navigation(NavigationStyle::Push))
//!     .add_pre_link_action(|| println!("leaving home"))
//!     .then(|detail| detail.label().to_string())?;
//!
//! assert_eq!(label, "Detail");
//! assert_eq!(stack.depth(), 2);
//! # Ok::<(), passage_core::TransitionError>(())
//! ```

mod close;
mod handler;
mod hooks;
mod node;
mod segue;
mod telemetry;

pub use close::{CloseFinder, CloseResolution, CloseTransitionNode};
pub use handler::TransitionHandler;
pub use hooks::Hook;
pub use node::TransitionNode;
pub use segue::SegueTransitionNode;

pub mod prelude {
    pub use crate::close::{CloseResolution, CloseTransitionNode};
    pub use crate::handler::TransitionHandler;
    pub use crate::node::TransitionNode;
    pub use crate::segue::SegueTransitionNode;
}
