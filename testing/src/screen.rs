use crate::{HostEvent, HostLog};
use passage_core::{
    LinkError, LinkReceiver, ModalStyle, ResourceContainer, Screen, ScreenId, TransitionDefaults,
};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::rc::{Rc, Weak};

/// Relationships a test screen tracks itself; parents live in the [`HostLog`].
#[derive(Default)]
pub(crate) struct Relations {
    presenting: RefCell<Option<Weak<dyn Screen>>>,
    resources: RefCell<Option<Rc<dyn ResourceContainer>>>,
}

impl Relations {
    pub(crate) fn presenting(&self) -> Option<Rc<dyn Screen>> {
        self.presenting.borrow().as_ref().and_then(Weak::upgrade)
    }

    pub(crate) fn set_presenting(&self, presenter: &Rc<dyn Screen>) {
        *self.presenting.borrow_mut() = Some(Rc::downgrade(presenter));
    }

    pub(crate) fn resources(&self) -> Option<Rc<dyn ResourceContainer>> {
        self.resources.borrow().clone()
    }

    pub(crate) fn set_resources(&self, resources: Rc<dyn ResourceContainer>) {
        *self.resources.borrow_mut() = Some(resources);
    }
}

type LinkTarget = Rc<dyn Fn() -> Rc<dyn Screen>>;

/// A plain screen recording every primitive it is asked to perform.
pub struct TestScreen<M = ()> {
    id: ScreenId,
    label: String,
    log: HostLog,
    relations: Relations,
    /// `None` target: the link fires but never reports a destination.
    links: RefCell<HashMap<String, Option<LinkTarget>>>,
    defaults: Cell<TransitionDefaults>,
    modal_style: Cell<Option<ModalStyle>>,
    _marker: PhantomData<fn() -> M>,
}

impl<M: 'static> TestScreen<M> {
    pub fn new(label: &str, log: HostLog) -> Self {
        Self {
            id: ScreenId::new(),
            label: label.to_string(),
            log,
            relations: Relations::default(),
            links: RefCell::new(HashMap::new()),
            defaults: Cell::new(TransitionDefaults::default()),
            modal_style: Cell::new(None),
            _marker: PhantomData,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_presenting(&self, presenter: Rc<dyn Screen>) {
        self.relations.set_presenting(&presenter);
    }

    pub fn set_resources(&self, resources: Rc<dyn ResourceContainer>) {
        self.relations.set_resources(resources);
    }

    pub fn set_transition_defaults(&self, defaults: TransitionDefaults) {
        self.defaults.set(defaults);
    }

    /// Wire a link that creates its destination with `make` and reports it.
    pub fn wire_link(&self, identifier: &str, make: impl Fn() -> Rc<dyn Screen> + 'static) {
        self.links
            .borrow_mut()
            .insert(identifier.to_string(), Some(Rc::new(make)));
    }

    /// Wire a link that fires but never reports a destination.
    pub fn wire_silent_link(&self, identifier: &str) {
        self.links.borrow_mut().insert(identifier.to_string(), None);
    }

    /// Modal style applied by the last modal presentation of this screen.
    pub fn modal_style(&self) -> Option<ModalStyle> {
        self.modal_style.get()
    }
}

impl<M: 'static> Screen for TestScreen<M> {
    fn id(&self) -> ScreenId {
        self.id
    }

    fn parent(&self) -> Option<Rc<dyn Screen>> {
        self.log.parent_of(self.id)
    }

    fn presenting_screen(&self) -> Option<Rc<dyn Screen>> {
        self.relations.presenting()
    }

    fn resources(&self) -> Option<Rc<dyn ResourceContainer>> {
        self.relations.resources()
    }

    fn present(&self, destination: Rc<dyn Screen>, animated: bool) {
        self.log.record(HostEvent::Presented {
            by: self.id,
            screen: destination.id(),
            animated,
        });
    }

    fn dismiss(&self, animated: bool) {
        self.log.record(HostEvent::Dismissed {
            screen: self.id,
            animated,
        });
    }

    fn apply_modal_style(&self, style: ModalStyle) {
        self.modal_style.set(Some(style));
        self.log.record(HostEvent::ModalStyleApplied {
            screen: self.id,
            style,
        });
    }

    fn perform_link(
        &self,
        identifier: &str,
        animated: bool,
        receiver: LinkReceiver,
    ) -> Result<(), LinkError> {
        let target = self
            .links
            .borrow()
            .get(identifier)
            .cloned()
            .ok_or_else(|| LinkError::Unknown {
                identifier: identifier.to_string(),
            })?;

        self.log.record(HostEvent::LinkPerformed {
            origin: self.id,
            identifier: identifier.to_string(),
            animated,
        });

        if let Some(make) = target {
            let destination = make();
            receiver.deliver(destination.clone());
            self.present(destination, animated);
        }
        Ok(())
    }

    fn transition_defaults(&self) -> TransitionDefaults {
        self.defaults.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TestHost;
    use passage_core::DestinationSlot;

    struct Detail;

    #[test]
    fn test_link_delivers_then_presents() {
        let host = TestHost::new();
        let home = host.screen::<()>("home");
        let log = host.log().clone();
        home.wire_link("showDetail", move || {
            Rc::new(TestScreen::<Detail>::new("detail", log.clone())) as Rc<dyn Screen>
        });

        let slot: DestinationSlot = Rc::new(RefCell::new(None));
        home.perform_link("showDetail", true, LinkReceiver::new(&slot))
            .unwrap();

        assert!(slot.borrow().is_some());
        assert_eq!(host.log().len(), 2);
    }

    #[test]
    fn test_unknown_link() {
        let host = TestHost::new();
        let home = host.screen::<()>("home");
        let slot: DestinationSlot = Rc::new(RefCell::new(None));
        let err = home
            .perform_link("nope", true, LinkReceiver::new(&slot))
            .unwrap_err();
        assert_eq!(
            err,
            LinkError::Unknown {
                identifier: "nope".into()
            }
        );
        assert!(host.log().is_empty());
    }

    #[test]
    fn test_type_label_names_marker() {
        let host = TestHost::new();
        let detail = host.screen::<Detail>("detail");
        assert!(detail.type_label().starts_with("TestScreen<"));
        assert!(detail.type_label().ends_with("Detail>"));
    }
}
