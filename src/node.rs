//! A named, immutable bundle of inbox references with name-keyed lookup
//! and a broadcast-write helper. Trivial dispatch over [`crate::inbox::Inbox`];
//! the node owns no slot storage of its own.

use std::sync::Arc;

use crate::diagnostics::{NoopReporter, Reporter};
use crate::error::{MeshError, Result};
use crate::inbox::Inbox;

/// An ordered, duplicate-free collection of inbox references sharing a name.
///
/// The node↔inbox relation is a bipartite reference set, not a cycle: a
/// node never owns its inboxes outright. [`Node::into_inboxes`] is the
/// "destroy and cascade" operation for callers who want combined ownership
/// — it returns the `Arc<Inbox<T>>` handles so dropping the last reference
/// to each frees it.
pub struct Node<T> {
    name: String,
    inboxes: Vec<Arc<Inbox<T>>>,
}

impl<T: Copy> Node<T> {
    /// Builds a node with a no-op diagnostics reporter. See
    /// [`Node::new_with_reporter`] to observe construction failures.
    pub fn new(name: impl Into<String>, inboxes: Vec<Arc<Inbox<T>>>) -> Result<Self> {
        Self::new_with_reporter(name, inboxes, &NoopReporter)
    }

    /// Fails when `name` is empty, `inboxes` is empty, or the same inbox is
    /// referenced more than once (by identity, not by name).
    pub fn new_with_reporter(
        name: impl Into<String>,
        inboxes: Vec<Arc<Inbox<T>>>,
        reporter: &dyn Reporter,
    ) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            let err = MeshError::empty_name();
            reporter.report(err.tag(), "node name must not be empty");
            return Err(err);
        }
        if inboxes.is_empty() {
            let err = MeshError::empty_node();
            reporter.report(err.tag(), "node must reference at least one inbox");
            return Err(err);
        }
        for i in 0..inboxes.len() {
            for j in (i + 1)..inboxes.len() {
                if Arc::ptr_eq(&inboxes[i], &inboxes[j]) {
                    let err = MeshError::duplicate_inbox(inboxes[i].name().to_string());
                    reporter.report(
                        err.tag(),
                        &format!("inbox \"{}\" referenced more than once", inboxes[i].name()),
                    );
                    return Err(err);
                }
            }
        }

        Ok(Self { name, inboxes })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn name_is(&self, name: &str) -> bool {
        self.name == name
    }

    /// Linear scan by name equality (reference §4.4).
    pub fn select_inbox(&self, name: &str) -> Option<&Arc<Inbox<T>>> {
        self.inboxes.iter().find(|inbox| inbox.name_is(name))
    }

    pub fn inboxes(&self) -> &[Arc<Inbox<T>>] {
        &self.inboxes
    }

    /// Spinning broadcast write (reference §4.3.4): writes `value` to every
    /// inbox in list order via [`Inbox::write_spin`], blocking until each
    /// has accepted it. All inboxes in a node must share the same payload
    /// type; this is enforced by `Node<T>`'s type parameter rather than an
    /// unchecked runtime precondition.
    pub fn broadcast(&self, value: T) {
        for inbox in &self.inboxes {
            inbox.write_spin(value);
        }
    }

    /// Consumes the node and returns its inbox references, the Rust
    /// realization of `destroy_node_and_inboxes`: each inbox is freed when
    /// its last `Arc` (here or elsewhere) drops.
    pub fn into_inboxes(self) -> Vec<Arc<Inbox<T>>> {
        self.inboxes
    }
}
