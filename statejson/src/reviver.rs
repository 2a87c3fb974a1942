// SPDX-License-Identifier: Apache-2.0

//! Post-parse transformation of a finished value tree.
//!
//! The walk is post-order over object members: nested members are revived
//! before the object holding them, and the root is revived last under the
//! empty key. Array elements are not visited; an array is only offered to
//! the reviver as a whole, as the value of its member. Like the parser, the
//! walk keeps its own stack instead of recursing.

use indexmap::map::IntoIter;
use log::trace;

use crate::value::{Map, Value};

/// A caller-supplied transform applied to each object member.
///
/// Returning `None` removes the member; `Some` replaces its value.
pub trait Reviver {
    fn revive(&mut self, key: &str, value: Value) -> Option<Value>;
}

impl<F> Reviver for F
where
    F: FnMut(&str, Value) -> Option<Value>,
{
    fn revive(&mut self, key: &str, value: Value) -> Option<Value> {
        self(key, value)
    }
}

/// An object whose members are being revived.
struct Pending {
    /// Key under which this object sits in its parent.
    key: String,
    /// Members not yet visited.
    members: IntoIter<String, Value>,
    /// Members already revived, in their original order.
    revived: Map,
}

impl Pending {
    fn new(key: String, members: Map) -> Self {
        Pending {
            key,
            members: members.into_iter(),
            revived: Map::new(),
        }
    }
}

/// Run `reviver` over `root`.
///
/// Returns `None` when the reviver removes the root itself.
pub fn revive<R: Reviver + ?Sized>(root: Value, reviver: &mut R) -> Option<Value> {
    if !root.is_object() {
        return reviver.revive("", root);
    }
    let members = root.into_object().unwrap_or_default();

    let mut stack = vec![Pending::new(String::new(), members)];
    while let Some(top) = stack.last_mut() {
        match top.members.next() {
            Some((key, value)) if value.is_object() => {
                let members = value.into_object().unwrap_or_default();
                stack.push(Pending::new(key, members));
            }
            Some((key, value)) => {
                if let Some(replacement) = reviver.revive(&key, value) {
                    top.revived.insert(key, replacement);
                }
            }
            None => {
                let Pending { key, revived, .. } = stack.pop()?;
                trace!("Revived object {key:?} with {} members", revived.len());
                let replacement = reviver.revive(&key, Value::Object(revived));
                match stack.last_mut() {
                    Some(parent) => {
                        if let Some(replacement) = replacement {
                            parent.revived.insert(key, replacement);
                        }
                    }
                    None => return replacement,
                }
            }
        }
    }
    None
}
