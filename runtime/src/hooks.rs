//! Hook composition around a node's default action.

use passage_core::TransitionResult;
use passage_core::schematic::{NodeKind, Schematic};

/// A caller-supplied action run once when the node executes.
pub type Hook = Box<dyn FnOnce()>;

/// Ordered pre-link and post-link hooks.
///
/// The default action sits between the two lists: every pre-link hook runs
/// before it and every post-link hook after it, each in insertion order.
#[derive(Default)]
pub(crate) struct HookChain {
    pre_link: Vec<Hook>,
    post_link: Vec<Hook>,
}

impl HookChain {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_pre_link(&mut self, hook: Hook) {
        self.pre_link.push(hook);
    }

    pub(crate) fn push_post_link(&mut self, hook: Hook) {
        self.post_link.push(hook);
    }

    /// Append the chain's steps to `schematic`, with `default` in the middle.
    pub(crate) fn describe(&self, schematic: &mut Schematic, default: &str) {
        for i in 0..self.pre_link.len() {
            schematic.push(NodeKind::PreLink, format!("pre-link #{}", i + 1));
        }
        schematic.push(NodeKind::Default, default);
        for i in 0..self.post_link.len() {
            schematic.push(NodeKind::PostLink, format!("post-link #{}", i + 1));
        }
    }

    /// Run pre-link hooks, the default action, then post-link hooks.
    ///
    /// A failing default action stops the chain; post-link hooks do not run.
    pub(crate) fn run<R>(self, default: impl FnOnce() -> TransitionResult<R>) -> TransitionResult<R> {
        let HookChain {
            pre_link,
            post_link,
        } = self;

        for (index, hook) in pre_link.into_iter().enumerate() {
            tracing::debug!(index, "running pre-link action");
            hook();
        }

        tracing::debug!("running default action");
        let output = default()?;

        for (index, hook) in post_link.into_iter().enumerate() {
            tracing::debug!(index, "running post-link action");
            hook();
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use passage_core::TransitionError;
    use passage_core::schematic::TransitionKind;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder(log: &Rc<RefCell<Vec<&'static str>>>, name: &'static str) -> Hook {
        let log = log.clone();
        Box::new(move || log.borrow_mut().push(name))
    }

    #[test]
    fn test_default_sits_between_hooks() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut chain = HookChain::new();
        chain.push_post_link(recorder(&log, "post-1"));
        chain.push_pre_link(recorder(&log, "pre-1"));
        chain.push_post_link(recorder(&log, "post-2"));
        chain.push_pre_link(recorder(&log, "pre-2"));

        let inner = log.clone();
        chain
            .run(|| {
                inner.borrow_mut().push("default");
                Ok(())
            })
            .unwrap();

        assert_eq!(
            *log.borrow(),
            vec!["pre-1", "pre-2", "default", "post-1", "post-2"]
        );
    }

    #[test]
    fn test_failing_default_skips_post_hooks() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut chain = HookChain::new();
        chain.push_pre_link(recorder(&log, "pre"));
        chain.push_post_link(recorder(&log, "post"));

        let result: TransitionResult<()> = chain.run(|| Err(TransitionError::NilDestination));

        assert!(matches!(result, Err(TransitionError::NilDestination)));
        assert_eq!(*log.borrow(), vec!["pre"]);
    }

    #[test]
    fn test_describe() {
        let mut chain = HookChain::new();
        chain.push_pre_link(Box::new(|| {}));
        chain.push_post_link(Box::new(|| {}));
        chain.push_post_link(Box::new(|| {}));

        let mut schematic = Schematic::new("node", TransitionKind::Storyboard);
        chain.describe(&mut schematic, "present:default");
        assert_eq!(
            schematic.steps(),
            vec!["pre-link #1", "present:default", "post-link #1", "post-link #2"]
        );
    }
}
