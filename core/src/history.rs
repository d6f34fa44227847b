use crate::screen::{Screen, ScreenId};
use std::fmt;
use std::rc::Rc;

/// Ordered navigation history, oldest entry first.
///
/// Hosts embed this in their navigation containers. The position of a screen
/// in the history is what close resolution looks at.
#[derive(Clone, Default)]
pub struct NavigationHistory {
    entries: Vec<Rc<dyn Screen>>,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: Rc<dyn Screen>) -> Self {
        Self {
            entries: vec![root],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first(&self) -> Option<&Rc<dyn Screen>> {
        self.entries.first()
    }

    pub fn last(&self) -> Option<&Rc<dyn Screen>> {
        self.entries.last()
    }

    pub fn get(&self, index: usize) -> Option<&Rc<dyn Screen>> {
        self.entries.get(index)
    }

    /// The entry one before the most recent one.
    pub fn previous(&self) -> Option<&Rc<dyn Screen>> {
        self.entries.len().checked_sub(2).and_then(|i| self.entries.get(i))
    }

    pub fn position(&self, id: ScreenId) -> Option<usize> {
        self.entries.iter().position(|s| s.id() == id)
    }

    pub fn contains(&self, id: ScreenId) -> bool {
        self.position(id).is_some()
    }

    pub fn push(&mut self, screen: Rc<dyn Screen>) {
        self.entries.push(screen);
    }

    pub fn pop(&mut self) -> Option<Rc<dyn Screen>> {
        self.entries.pop()
    }

    /// Remove every entry above `id`. Returns the removed entries, newest last.
    ///
    /// An unknown id leaves the history untouched.
    pub fn pop_to(&mut self, id: ScreenId) -> Vec<Rc<dyn Screen>> {
        match self.position(id) {
            Some(index) => self.entries.split_off(index + 1),
            None => Vec::new(),
        }
    }

    /// Keep only the first entry.
    pub fn pop_to_root(&mut self) -> Vec<Rc<dyn Screen>> {
        if self.entries.is_empty() {
            return Vec::new();
        }
        self.entries.split_off(1)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Rc<dyn Screen>> {
        self.entries.iter()
    }

    pub fn ids(&self) -> Vec<ScreenId> {
        self.entries.iter().map(|s| s.id()).collect()
    }

    pub fn to_vec(&self) -> Vec<Rc<dyn Screen>> {
        self.entries.clone()
    }
}

impl From<Vec<Rc<dyn Screen>>> for NavigationHistory {
    fn from(entries: Vec<Rc<dyn Screen>>) -> Self {
        Self { entries }
    }
}

impl fmt::Debug for NavigationHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|s| s.type_label()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain(ScreenId);

    impl Screen for Plain {
        fn id(&self) -> ScreenId {
            self.0
        }
        fn parent(&self) -> Option<Rc<dyn Screen>> {
            None
        }
        fn presenting_screen(&self) -> Option<Rc<dyn Screen>> {
            None
        }
        fn present(&self, _destination: Rc<dyn Screen>, _animated: bool) {}
        fn dismiss(&self, _animated: bool) {}
    }

    fn history_of(n: usize) -> NavigationHistory {
        let entries: Vec<Rc<dyn Screen>> = (0..n)
            .map(|_| Rc::new(Plain(ScreenId::new())) as Rc<dyn Screen>)
            .collect();
        NavigationHistory::from(entries)
    }

    #[test]
    fn test_previous_entry() {
        let history = history_of(3);
        let expected = history.get(1).map(|s| s.id());
        assert_eq!(history.previous().map(|s| s.id()), expected);
        assert!(history_of(1).previous().is_none());
    }

    #[test]
    fn test_pop_to_keeps_target() {
        let mut history = history_of(4);
        let ids = history.ids();
        let removed = history.pop_to(ids[1]);
        assert_eq!(removed.len(), 2);
        assert_eq!(history.ids(), ids[..2].to_vec());
    }

    #[test]
    fn test_pop_to_unknown_is_noop() {
        let mut history = history_of(3);
        assert!(history.pop_to(ScreenId::new()).is_empty());
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_pop_to_root() {
        let mut history = history_of(3);
        let root = history.ids()[0];
        assert_eq!(history.pop_to_root().len(), 2);
        assert_eq!(history.ids(), vec![root]);
        assert!(NavigationHistory::new().pop_to_root().is_empty());
    }
}
