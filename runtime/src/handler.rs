//! # TransitionHandler: the capability every screen exposes
//!
//! Implemented for `Rc<S>` of any concrete screen and for `Rc<dyn Screen>`,
//! so a screen gains the four operations without any base type.
//!
//! Every operation returns a node with its default action installed. Nothing
//! visible changes until the node's terminal operation runs.

use crate::close::CloseTransitionNode;
use crate::node::TransitionNode;
use crate::segue::SegueTransitionNode;
use passage_core::{Screen, ScreenFactory, TransitionError, TransitionResult};
use std::rc::Rc;

pub trait TransitionHandler {
    /// The screen transitions start from.
    fn transition_origin(&self) -> Rc<dyn Screen>;

    /// Transition to the screen registered under `restoration_id` in the
    /// origin's own resource container.
    fn for_current_storyboard<T: Screen>(
        &self,
        restoration_id: &str,
    ) -> TransitionResult<TransitionNode<T>> {
        let origin = self.transition_origin();
        let resources = origin
            .resources()
            .ok_or(TransitionError::ResourceUnavailable)?;
        let destination = resources.instantiate(restoration_id)?;
        tracing::debug!(
            origin = %origin.id(),
            destination = %destination.id(),
            restoration_id,
            "destination instantiated from current storyboard"
        );
        Ok(TransitionNode::new(&origin, Some(destination)))
    }

    /// Transition to a screen produced by `factory`.
    fn for_storyboard<T: Screen>(
        &self,
        factory: &dyn ScreenFactory,
    ) -> TransitionResult<TransitionNode<T>> {
        let origin = self.transition_origin();
        let destination = factory
            .instantiate_handler()
            .map_err(TransitionError::FactoryFailure)?;
        tracing::debug!(
            origin = %origin.id(),
            destination = %destination.id(),
            "destination instantiated from factory"
        );
        Ok(TransitionNode::new(&origin, Some(destination)))
    }

    /// Transition through the link wired under `identifier`.
    fn for_segue<T: Screen>(&self, identifier: &str) -> SegueTransitionNode<T> {
        SegueTransitionNode::new(&self.transition_origin(), identifier)
    }

    /// Close the origin, back to an earlier screen.
    fn close_current_module(&self) -> CloseTransitionNode {
        CloseTransitionNode::new(&self.transition_origin())
    }
}

impl<S: Screen> TransitionHandler for Rc<S> {
    fn transition_origin(&self) -> Rc<dyn Screen> {
        self.clone()
    }
}

impl TransitionHandler for Rc<dyn Screen> {
    fn transition_origin(&self) -> Rc<dyn Screen> {
        self.clone()
    }
}
