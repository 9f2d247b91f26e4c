//! Object-creation workloads shared by the benches.
//!
//! - [`churn_sized`]: allocate-and-drop sized handles in a loop
//! - [`churn_static`]: fetch the static handle in a loop
//! - [`attribute_chain`]: build a linked chain of owned nodes, the
//!   "one object per attribute access" pattern the handles are compared
//!   against

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use handlebench_core::{Bridge, HandleError, HostAllocator, StaticHandle};

/// Create and immediately drop `iterations` sized handles of `size` bytes.
///
/// Returns the number of handles created.
pub fn churn_sized<A: HostAllocator>(
    bridge: &Bridge<A>,
    size: i64,
    iterations: usize,
) -> Result<usize, HandleError> {
    let mut created = 0;
    for _ in 0..iterations {
        let handle = bridge.create_sized_handle(size)?;
        std::hint::black_box(&handle);
        created += 1;
    }
    Ok(created)
}

/// Fetch the static handle `iterations` times and return the last one.
pub fn churn_static<A>(bridge: &Bridge<A>, iterations: usize) -> Option<StaticHandle> {
    let mut last = None;
    for _ in 0..iterations {
        last = Some(std::hint::black_box(bridge.create_static_handle()));
    }
    last
}

/// One link of an attribute chain.
pub struct Node {
    /// Attribute name this node stands for.
    pub name: char,
    /// The node this one was reached from.
    pub parent: Option<Box<Node>>,
}

/// Build a chain `a.b.c...` of `depth` nodes, each owning its parent.
pub fn attribute_chain(depth: usize) -> Option<Box<Node>> {
    let mut tip: Option<Box<Node>> = None;
    for name in ('a'..='z').cycle().take(depth) {
        tip = Some(Box::new(Node { name, parent: tip }));
    }
    tip
}

/// Length of a chain, walking parents from the tip.
pub fn chain_len(tip: Option<&Node>) -> usize {
    let mut len = 0;
    let mut cur = tip;
    while let Some(node) = cur {
        len += 1;
        cur = node.parent.as_deref();
    }
    len
}
