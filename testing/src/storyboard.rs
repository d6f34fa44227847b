use crate::screen::TestScreen;
use crate::HostLog;
use passage_core::{ResourceContainer, ResourceError, Screen, ScreenId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

type Maker = Rc<dyn Fn() -> Rc<dyn Screen>>;

/// In-memory resource container.
pub struct TestStoryboard {
    log: HostLog,
    entries: RefCell<HashMap<String, Maker>>,
    initial: RefCell<Option<Maker>>,
    instantiated: RefCell<Vec<ScreenId>>,
}

impl TestStoryboard {
    pub fn new(log: HostLog) -> Self {
        Self {
            log,
            entries: RefCell::new(HashMap::new()),
            initial: RefCell::new(None),
            instantiated: RefCell::new(Vec::new()),
        }
    }

    pub fn register(&self, identifier: &str, make: impl Fn() -> Rc<dyn Screen> + 'static) {
        self.entries
            .borrow_mut()
            .insert(identifier.to_string(), Rc::new(make));
    }

    /// Register a `TestScreen<M>` labelled after its identifier.
    pub fn register_screen<M: 'static>(&self, identifier: &str) {
        let log = self.log.clone();
        let label = identifier.to_string();
        self.register(identifier, move || {
            Rc::new(TestScreen::<M>::new(&label, log.clone())) as Rc<dyn Screen>
        });
    }

    pub fn set_initial_screen<M: 'static>(&self, label: &str) {
        let log = self.log.clone();
        let label = label.to_string();
        *self.initial.borrow_mut() = Some(Rc::new(move || {
            Rc::new(TestScreen::<M>::new(&label, log.clone())) as Rc<dyn Screen>
        }));
    }

    /// Ids of every screen this storyboard created, oldest first.
    pub fn instantiated(&self) -> Vec<ScreenId> {
        self.instantiated.borrow().clone()
    }

    fn build(&self, make: Maker) -> Rc<dyn Screen> {
        let screen = make();
        self.instantiated.borrow_mut().push(screen.id());
        screen
    }
}

impl ResourceContainer for TestStoryboard {
    fn instantiate(&self, identifier: &str) -> Result<Rc<dyn Screen>, ResourceError> {
        let make = self
            .entries
            .borrow()
            .get(identifier)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound {
                identifier: identifier.to_string(),
            })?;
        Ok(self.build(make))
    }

    fn instantiate_initial(&self) -> Result<Rc<dyn Screen>, ResourceError> {
        let make = self
            .initial
            .borrow()
            .clone()
            .ok_or(ResourceError::NoInitialScreen)?;
        Ok(self.build(make))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TestHost;

    struct Profile;

    #[test]
    fn test_register_and_instantiate() {
        let host = TestHost::new();
        let storyboard = host.storyboard();
        storyboard.register_screen::<Profile>("Profile");

        let screen = storyboard.instantiate("Profile").ok().unwrap();
        assert_eq!(storyboard.instantiated(), vec![screen.id()]);
        assert!(screen.into_any_rc().downcast::<TestScreen<Profile>>().is_ok());
    }

    #[test]
    fn test_unknown_identifier() {
        let host = TestHost::new();
        let storyboard = host.storyboard();
        let err = storyboard.instantiate("Missing").err().unwrap();
        assert_eq!(
            err,
            ResourceError::NotFound {
                identifier: "Missing".into()
            }
        );
        assert!(storyboard.instantiate_initial().is_err());
    }
}
