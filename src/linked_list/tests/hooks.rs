extern crate std;

use std::format;
use std::rc::Rc;
use std::string::String;
use std::sync::{Arc, Mutex};
use std::vec;
use std::vec::Vec;

use crate::linked_list::hooks::{Hooks, Identity};
use crate::linked_list::list::List;
use crate::linked_list::node::NodePool;

/// A list of numbers recording every value passed to its free hook.
fn recording_list() -> (List<u32>, NodePool<u32>, Arc<Mutex<Vec<u32>>>) {
    let freed = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&freed);
    let mut list = List::new();
    list.set_free(move |v: u32| sink.lock().unwrap().push(v));

    let mut pool = NodePool::new();
    for v in 1..=4 {
        list.add_tail(&mut pool, v).unwrap();
    }
    (list, pool, freed)
}

#[test]
fn test_free_hook_on_del_node() {
    let (mut list, mut pool, freed) = recording_list();
    let node = list.index(&pool, 1).unwrap();
    list.del_node(&mut pool, node);
    assert_eq!(*freed.lock().unwrap(), vec![2]);
}

#[test]
fn test_free_hook_on_clear_and_release() {
    let (mut list, mut pool, freed) = recording_list();
    list.clear(&mut pool);
    assert_eq!(*freed.lock().unwrap(), vec![1, 2, 3, 4]);

    list.add_tail(&mut pool, 9).unwrap();
    list.release(&mut pool);
    assert_eq!(*freed.lock().unwrap(), vec![1, 2, 3, 4, 9]);
}

#[test]
fn test_free_hook_skipped_when_value_is_returned() {
    let (mut list, mut pool, freed) = recording_list();
    let node = list.first(&pool).unwrap();
    assert_eq!(list.unlink_node(&mut pool, node), 1);
    assert_eq!(list.pop_head(&mut pool), Some(2));
    assert_eq!(list.pop_tail(&mut pool), Some(4));
    list.rotate(&mut pool);
    assert!(freed.lock().unwrap().is_empty());
}

#[test]
fn test_free_hook_not_called_on_join() {
    let (mut list, mut pool, freed) = recording_list();
    let mut other = List::with_hooks(list.hooks().clone());
    other.add_tail(&mut pool, 5).unwrap();

    list.join(&mut pool, &mut other);
    assert!(freed.lock().unwrap().is_empty());

    // Joined nodes are released by the destination.
    list.clear(&mut pool);
    assert_eq!(*freed.lock().unwrap(), vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_cleared_hooks_fall_back_to_defaults() {
    let (mut list, mut pool, freed) = recording_list();
    list.hooks_mut().clear_free();
    list.clear(&mut pool);
    assert!(freed.lock().unwrap().is_empty());

    let mut hooks = Hooks::<u32>::new();
    hooks.set_match(|_, _| true);
    hooks.clear_match();
    assert!(hooks.match_fn().is_none());
}

#[test]
fn test_hooks_debug_reports_installed_hooks() {
    let mut hooks = Hooks::<u32>::default();
    hooks.set_dup(|v| Some(*v));
    assert_eq!(
        format!("{hooks:?}"),
        "Hooks { dup: true, free: false, matches: false }"
    );
}

#[test]
fn test_identity_of_handles() {
    let a = Arc::new(String::from("same"));
    let b = Arc::new(String::from("same"));
    assert!(a.is_same(&Arc::clone(&a)));
    assert!(!a.is_same(&b));

    let r = Rc::new(3);
    assert!(r.is_same(&Rc::clone(&r)));
    assert!(!r.is_same(&Rc::new(3)));

    let x = 1;
    let y = 1;
    assert!(<&i32 as Identity>::is_same(&&x, &&x));
    assert!(!<&i32 as Identity>::is_same(&&x, &&y));

    let p: *const i32 = &x;
    assert!(p.is_same(&p));
}

#[test]
fn test_identity_of_scalars() {
    assert!(7u64.is_same(&7));
    assert!(!'a'.is_same(&'b'));
    assert!(true.is_same(&true));
}

#[test]
fn test_search_key_with_references() {
    let names = [String::from("a"), String::from("b"), String::from("a")];
    let mut pool = NodePool::new();
    let mut list = List::new();
    for name in &names {
        list.add_tail(&mut pool, name).unwrap();
    }

    // Identity picks the exact element, not the first equal one.
    let found = list.search_key(&pool, &&names[2]).unwrap();
    assert_eq!(list.index(&pool, 2), Some(found));

    list.set_match(|v: &&String, k: &&String| v == k);
    let found = list.search_key(&pool, &&names[2]).unwrap();
    assert_eq!(list.index(&pool, 0), Some(found));
}
