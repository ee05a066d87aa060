//! Integration tests for the generational arena that stores controls.

use vulpes_core::alloc::sparse_set::{IndexSlot, SparseSet};

#[test]
fn test_stale_handle_is_rejected_after_reuse() {
    let mut set = SparseSet::new();
    let old = set.push("panel");
    set.remove(old);

    let new = set.push("button");
    assert_eq!(new.index(), old.index());
    assert_eq!(new.generation(), old.generation() + 1);
    assert_eq!(set.try_get(old), None);
    assert!(!set.contains(old));
    assert_eq!(*set.get(new), "button");
}

#[test]
#[should_panic(expected = "invalid generation")]
fn test_get_after_remove_panics() {
    let mut set = SparseSet::new();
    let idx = set.push(1u32);
    set.remove(idx);
    let _ = set.get(idx);
}

#[test]
#[should_panic(expected = "invalid generation")]
fn test_double_remove_panics() {
    let mut set = SparseSet::new();
    let idx = set.push(1u32);
    set.remove(idx);
    set.remove(idx);
}

#[test]
fn test_len_tracks_push_and_remove() {
    let mut set = SparseSet::new();
    let handles: Vec<IndexSlot> = (0..10).map(|i| set.push(i)).collect();
    assert_eq!(set.len(), 10);

    for idx in handles.iter().step_by(2) {
        set.remove(*idx);
    }
    assert_eq!(set.len(), 5);

    let odd: Vec<_> = set.iter().copied().collect();
    assert_eq!(odd, vec![1, 3, 5, 7, 9]);
}

#[test]
fn test_iter_mut_updates_in_place() {
    let mut set = SparseSet::new();
    let a = set.push(10);
    let b = set.push(20);
    for value in set.iter_mut() {
        *value += 1;
    }
    assert_eq!(*set.get(a), 11);
    assert_eq!(*set.get(b), 21);
}

#[test]
fn test_get_mut_through_live_handle() {
    let mut set = SparseSet::new();
    let idx = set.push(String::from("tab"));
    set.get_mut(idx).push_str("bar");
    assert_eq!(set.get(idx), "tabbar");
    assert_eq!(set.try_get_mut(IndexSlot::new(3, 0)), None);
}

#[test]
fn test_many_generations_on_one_slot() {
    let mut set = SparseSet::new();
    let mut last = set.push(0);
    for value in 1..50 {
        set.remove(last);
        let next = set.push(value);
        assert_eq!(next.index(), 0);
        assert_eq!(set.try_get(last), None);
        last = next;
    }
    assert_eq!(last.generation(), 49);
    assert_eq!(set.len(), 1);
}
