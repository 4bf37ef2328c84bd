/*
** This file is a part of Tagtree (incremental XML subset parser)
** Copyright (C) 2025 The Tagtree Developers
**
** Tagtree is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use super::*;

const CHARS: &str = "1234567890abcdefghijklmnopqrstuv";

#[test]
fn it_works() {
    let mut arena = Arena::new();
    assert!(arena.is_empty());

    let a = arena.alloc("test".to_string()).unwrap();
    let b = arena.alloc("moretest".to_string()).unwrap();
    assert_ne!(a, b);
    assert_eq!(arena.len(), 2);
    assert_eq!(arena.get(a).unwrap(), "test");
    assert_eq!(arena.get(b).unwrap(), "moretest");

    arena.get_mut(a).unwrap().push_str("ing");
    assert_eq!(arena.get(a).unwrap(), "testing");
}

#[test]
fn many_allocs() {
    let mut arena = Arena::with_capacity(0).unwrap();
    let old_capacity = arena.stats().capacity;

    let mut ids = Vec::new();
    for _ in 0..1000 {
        for j in 0..CHARS.len() {
            ids.push(arena.alloc(&CHARS[..j]).unwrap());
        }
    }
    let stats = arena.stats();
    assert_eq!(stats.nr_items, 1000 * CHARS.len());
    assert!(stats.capacity > old_capacity);
    assert!(stats.allocated_bytes >= stats.nr_items * std::mem::size_of::<&str>());
    for (n, id) in ids.iter().enumerate() {
        assert_eq!(arena.get(*id).unwrap().len(), n % CHARS.len());
    }
}

#[test]
fn foreign_ids() {
    let mut big = Arena::new();
    let small: Arena<u8> = Arena::new();
    let id = big.alloc(1u8).unwrap();
    assert!(big.contains(id));
    assert!(!small.contains(id));
    assert!(small.get(id).is_none());

    // same position, different arena
    let mut other = Arena::new();
    let local = other.alloc(2u8).unwrap();
    assert_eq!(local.index(), id.index());
    assert!(!other.contains(id));
    assert!(other.get(id).is_none());
    assert!(other.get_mut(id).is_none());
    assert!(!big.contains(local));
    assert_eq!(big.get(id), Some(&1));
    assert_eq!(other.get(local), Some(&2));
}
