//! Topological ordering of elements with references.
//!
//! The output lists every element before the elements it refers to. Elements
//! are marked when first entered, so a reference back to an element that is
//! still being visited is a no-op rather than a failure; callers only use
//! this on graphs where such cycles carry no ordering information.

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

use indexmap::IndexSet;

use crate::{Error, Result};

/// What to do with a referenced element that is not part of the input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnknownReference {
    /// Treat it as newly discovered and include it (and its references).
    #[default]
    Add,
    /// Skip it and everything only reachable through it.
    Ignore,
    /// Abort with [`Error::UnknownReference`].
    Fail,
}

struct Frame<T> {
    element: T,
    pending: std::vec::IntoIter<T>,
}

/// Order `elements` so that each comes before all of its (transitive)
/// references. Input order decides between unrelated elements: later input
/// elements come first.
pub fn topo_sort<T, F, I>(
    elements: impl IntoIterator<Item = T>,
    mut references: F,
    unknown: UnknownReference,
) -> Result<Vec<T>>
where
    T: Clone + Eq + Hash + Display,
    F: FnMut(&T) -> I,
    I: IntoIterator<Item = T>,
{
    let known: IndexSet<T> = elements.into_iter().collect();
    let mut entered: HashSet<T> = HashSet::with_capacity(known.len());
    let mut post_order: Vec<T> = Vec::with_capacity(known.len());

    for start in &known {
        if !entered.insert(start.clone()) {
            continue;
        }
        let mut stack = vec![Frame {
            pending: references(start).into_iter().collect::<Vec<_>>().into_iter(),
            element: start.clone(),
        }];

        while let Some(frame) = stack.last_mut() {
            if let Some(next) = frame.pending.next() {
                if entered.contains(&next) {
                    continue;
                }
                if !known.contains(&next) {
                    match unknown {
                        UnknownReference::Add => {}
                        UnknownReference::Ignore => continue,
                        UnknownReference::Fail => {
                            return Err(Error::UnknownReference {
                                referrer: frame.element.to_string(),
                                element: next.to_string(),
                            });
                        }
                    }
                }
                entered.insert(next.clone());
                let pending = references(&next).into_iter().collect::<Vec<_>>().into_iter();
                stack.push(Frame {
                    element: next,
                    pending,
                });
            } else if let Some(done) = stack.pop() {
                post_order.push(done.element);
            }
        }
    }

    post_order.reverse();
    Ok(post_order)
}
