extern crate std;

use std::vec::Vec;

use super::list::List;
use super::node::NodePool;

mod hooks;

/// Values from head to tail.
fn forward<T: Clone>(list: &List<T>, pool: &NodePool<T>) -> Vec<T> {
    list.iter(pool).cloned().collect()
}

/// Values from tail to head, walking `prev` links one node at a time.
fn backward<T: Clone>(list: &List<T>, pool: &NodePool<T>) -> Vec<T> {
    let mut values = Vec::new();
    let mut current = list.last(pool);
    while let Some(node) = current {
        values.push(pool.get(node).cloned().unwrap());
        current = pool.prev_of(node);
    }
    values
}

/// Checks length against both walks and every neighbor back-link.
fn assert_consistent<T>(list: &List<T>, pool: &NodePool<T>) {
    let mut forward = 0;
    let mut current = list.first(pool);
    let mut prev = None;
    while let Some(node) = current {
        assert_eq!(pool.prev_of(node), prev, "broken prev link at {node:?}");
        forward += 1;
        prev = Some(node);
        current = pool.next_of(node);
    }
    assert_eq!(prev, list.last(pool), "walk did not end at the tail");
    assert_eq!(forward, list.len());

    let mut backward = 0;
    let mut current = list.last(pool);
    while let Some(node) = current {
        backward += 1;
        current = pool.prev_of(node);
    }
    assert_eq!(backward, list.len());
    assert_eq!(list.is_empty(), list.first(pool).is_none());
    assert_eq!(list.is_empty(), list.last(pool).is_none());
}
