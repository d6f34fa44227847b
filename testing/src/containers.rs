use crate::screen::Relations;
use crate::{HostEvent, HostLog};
use passage_core::{NavigationContainer, NavigationHistory, Screen, ScreenId, SplitContainer};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// In-memory navigation stack.
///
/// Screens it embeds report it as their parent until they are popped.
pub struct TestNavigationStack {
    id: ScreenId,
    label: String,
    log: HostLog,
    this: Weak<TestNavigationStack>,
    relations: Relations,
    history: RefCell<NavigationHistory>,
}

impl TestNavigationStack {
    pub fn new(label: &str, log: HostLog) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            id: ScreenId::new(),
            label: label.to_string(),
            log,
            this: this.clone(),
            relations: Relations::default(),
            history: RefCell::new(NavigationHistory::new()),
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Place `child` on top of the history without recording a push.
    pub fn adopt<C: Screen>(&self, child: &Rc<C>) {
        self.embed(child.clone());
    }

    fn embed(&self, child: Rc<dyn Screen>) {
        let this: Weak<dyn Screen> = self.this.clone();
        self.log.attach(child.id(), this);
        self.history.borrow_mut().push(child);
    }

    fn release(&self, removed: &[Rc<dyn Screen>]) {
        for screen in removed {
            self.log.detach(screen.id());
        }
    }

    pub fn depth(&self) -> usize {
        self.history.borrow().len()
    }

    pub fn history_ids(&self) -> Vec<ScreenId> {
        self.history.borrow().ids()
    }

    pub fn top(&self) -> Option<ScreenId> {
        self.history.borrow().last().map(|s| s.id())
    }

    pub fn set_presenting(&self, presenter: Rc<dyn Screen>) {
        self.relations.set_presenting(&presenter);
    }
}

impl Screen for TestNavigationStack {
    fn id(&self) -> ScreenId {
        self.id
    }

    fn parent(&self) -> Option<Rc<dyn Screen>> {
        self.log.parent_of(self.id)
    }

    fn presenting_screen(&self) -> Option<Rc<dyn Screen>> {
        self.relations.presenting()
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

    fn as_navigation(&self) -> Option<&dyn NavigationContainer> {
        Some(self)
    }
}

impl NavigationContainer for TestNavigationStack {
    fn history(&self) -> Vec<Rc<dyn Screen>> {
        self.history.borrow().to_vec()
    }

    fn push_child(&self, screen: Rc<dyn Screen>, animated: bool) {
        self.log.record(HostEvent::Pushed {
            container: self.id,
            screen: screen.id(),
            animated,
        });
        self.embed(screen);
    }

    fn pop_child(&self, animated: bool) -> Option<Rc<dyn Screen>> {
        let popped = self.history.borrow_mut().pop();
        if let Some(screen) = &popped {
            self.log.detach(screen.id());
        }
        self.log.record(HostEvent::Popped {
            container: self.id,
            screen: popped.as_ref().map(|s| s.id()),
            animated,
        });
        popped
    }

    fn pop_to_child(&self, screen: &Rc<dyn Screen>, animated: bool) {
        self.log.record(HostEvent::PoppedTo {
            container: self.id,
            screen: screen.id(),
            animated,
        });
        let removed = self.history.borrow_mut().pop_to(screen.id());
        self.release(&removed);
    }

    fn pop_to_root(&self, animated: bool) {
        self.log.record(HostEvent::PoppedToRoot {
            container: self.id,
            animated,
        });
        let removed = self.history.borrow_mut().pop_to_root();
        self.release(&removed);
    }
}

/// In-memory split container.
pub struct TestSplitView {
    id: ScreenId,
    label: String,
    log: HostLog,
    this: Weak<TestSplitView>,
    relations: Relations,
    primary: RefCell<Option<ScreenId>>,
    detail: RefCell<Option<ScreenId>>,
}

impl TestSplitView {
    pub fn new(label: &str, log: HostLog) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            id: ScreenId::new(),
            label: label.to_string(),
            log,
            this: this.clone(),
            relations: Relations::default(),
            primary: RefCell::new(None),
            detail: RefCell::new(None),
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Make `child` the primary pane without recording a show.
    pub fn adopt<C: Screen>(&self, child: &Rc<C>) {
        self.embed(child.id());
        *self.primary.borrow_mut() = Some(child.id());
    }

    fn embed(&self, child: ScreenId) {
        let this: Weak<dyn Screen> = self.this.clone();
        self.log.attach(child, this);
    }

    pub fn primary(&self) -> Option<ScreenId> {
        *self.primary.borrow()
    }

    pub fn detail(&self) -> Option<ScreenId> {
        *self.detail.borrow()
    }
}

impl Screen for TestSplitView {
    fn id(&self) -> ScreenId {
        self.id
    }

    fn parent(&self) -> Option<Rc<dyn Screen>> {
        self.log.parent_of(self.id)
    }

    fn presenting_screen(&self) -> Option<Rc<dyn Screen>> {
        self.relations.presenting()
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

    fn as_split(&self) -> Option<&dyn SplitContainer> {
        Some(self)
    }
}

impl SplitContainer for TestSplitView {
    fn show(&self, screen: Rc<dyn Screen>, animated: bool) {
        self.log.record(HostEvent::Shown {
            container: self.id,
            screen: screen.id(),
            animated,
        });
        self.embed(screen.id());
        *self.primary.borrow_mut() = Some(screen.id());
    }

    fn show_detail(&self, screen: Rc<dyn Screen>, animated: bool) {
        self.log.record(HostEvent::ShownDetail {
            container: self.id,
            screen: screen.id(),
            animated,
        });
        self.embed(screen.id());
        *self.detail.borrow_mut() = Some(screen.id());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TestHost;

    #[test]
    fn test_stack_push_and_pop() {
        let host = TestHost::new();
        let stack = host.navigation_stack("nav");
        let root = host.screen::<()>("root");
        stack.adopt(&root);

        let next = host.screen::<()>("next");
        stack.push_child(next.clone(), true);
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.top(), Some(next.id()));

        let popped = stack.pop_child(false).map(|s| s.id());
        assert_eq!(popped, Some(next.id()));
        assert_eq!(stack.depth(), 1);
        assert_eq!(host.log().len(), 2);
    }

    #[test]
    fn test_adopt_sets_parent() {
        let host = TestHost::new();
        let stack = host.navigation_stack("nav");
        let root = host.screen::<()>("root");
        stack.adopt(&root);

        let parent = root.parent().unwrap();
        assert_eq!(parent.id(), stack.id());
        assert!(parent.as_navigation().is_some());
        assert!(host.log().is_empty());
    }

    #[test]
    fn test_popped_screens_lose_their_parent() {
        let host = TestHost::new();
        let stack = host.navigation_stack("nav");
        let root = host.screen::<()>("root");
        stack.adopt(&root);
        let next = host.screen::<()>("next");
        stack.push_child(next.clone(), true);
        assert_eq!(next.parent().map(|p| p.id()), Some(stack.id()));

        stack.pop_to_root(true);
        assert!(next.parent().is_none());
        assert!(root.parent().is_some());
    }

    #[test]
    fn test_split_show_detail() {
        let host = TestHost::new();
        let split = host.split_view("split");
        let detail = host.screen::<()>("detail");
        split.show_detail(detail.clone(), true);
        assert_eq!(split.detail(), Some(detail.id()));
    }
}
