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

const NAMES: &[&str] = &["alpha", "beta", "gamma"];

#[test]
fn resolves_known_names() {
    let table = NameTable::new(NAMES);
    assert_eq!(table.len(), 3);
    assert_eq!(table.resolve("alpha", 128), Ok(Some(0)));
    assert_eq!(table.resolve("gamma", 128), Ok(Some(2)));
    assert_eq!(table.get(1), Some("beta"));
    assert_eq!(table.get(3), None);
}

#[test]
fn misses() {
    let table = NameTable::new(NAMES);
    assert_eq!(table.resolve("delta", 128), Ok(None));
    assert_eq!(table.resolve("Alpha", 128), Ok(None));
    assert_eq!(table.resolve("alph", 128), Ok(None));
    assert_eq!(table.resolve("", 128), Ok(None));
}

#[test]
fn empty_table_always_misses() {
    let table = NameTable::empty();
    assert!(table.is_empty());
    assert_eq!(table.resolve("alpha", 128), Ok(None));
}

#[test]
fn comparison_is_bounded() {
    let table = NameTable::new(NAMES);
    assert_eq!(table.resolve("alphabet", 5), Ok(Some(0)));
    assert_eq!(table.resolve("alphabet", 6), Ok(None));
    assert!(names_equal("abcd", "abce", 3));
    assert!(!names_equal("abcd", "abce", 4));
}

#[test]
fn empty_entry_is_rejected() {
    let table = NameTable::new(&["one", "", "two"]);
    assert_eq!(table.resolve("one", 128), Ok(Some(0)));
    assert_eq!(table.resolve("two", 128), Err(BadNameTable { index: 1 }));
}
