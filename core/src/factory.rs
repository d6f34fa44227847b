use crate::error::FactoryError;
use crate::screen::{ResourceContainer, Screen, ScreenFactory};
use std::rc::Rc;

/// [`ScreenFactory`] backed by a resource container.
///
/// Instantiates the screen registered under `restoration_id`, or the
/// container's initial screen when no id is given.
#[derive(Clone)]
pub struct StoryboardFactory {
    resources: Rc<dyn ResourceContainer>,
    restoration_id: Option<String>,
}

impl StoryboardFactory {
    pub fn new(resources: Rc<dyn ResourceContainer>) -> Self {
        Self {
            resources,
            restoration_id: None,
        }
    }

    pub fn with_restoration_id(mut self, restoration_id: impl Into<String>) -> Self {
        self.restoration_id = Some(restoration_id.into());
        self
    }

    pub fn restoration_id(&self) -> Option<&str> {
        self.restoration_id.as_deref()
    }
}

impl ScreenFactory for StoryboardFactory {
    fn instantiate_handler(&self) -> Result<Rc<dyn Screen>, FactoryError> {
        let screen = match &self.restoration_id {
            Some(id) => self.resources.instantiate(id)?,
            None => self.resources.instantiate_initial()?,
        };
        Ok(screen)
    }
}
