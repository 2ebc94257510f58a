// Copyright (c) 2025 Prefix Tree Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Integration tests for the public prefix tree API.

use prefix_tree::config::{ConfigLoader, Settings};
use prefix_tree::{KeyedTrie, PrefixTreeError, Trie};

fn keys_of(trie: &Trie, finite_only: bool) -> Vec<String> {
    let mut keys = Vec::new();
    let mut it = trie.begin(finite_only);
    while it != trie.end() {
        keys.push(it.get_key().unwrap().to_string());
        it.advance_forward();
    }
    keys
}

#[test]
fn test_exists_for_keys_and_prefixes() {
    let mut trie = Trie::new();
    for key in ["abc", "def", "abcdef", "abcdee", "abcd"] {
        assert!(trie.insert(key));
    }

    assert!(trie.exists("abc", true));
    assert!(trie.exists("ab", false));
    assert!(!trie.exists("ab", true));
}

#[test]
fn test_iterator() {
    let trie: Trie = ["abc", "def", "abcdef"].into_iter().collect();

    let mut it = trie.begin(true);
    assert_eq!(it.get_key(), Ok("abc"));
    it.advance_forward();
    assert_eq!(it.get_key(), Ok("abcdef"));
    it.advance_forward();
    assert_eq!(it.get_key(), Ok("def"));
    it.advance_forward();
    assert_eq!(it, trie.end());
}

#[test]
fn test_iterator_decrement() {
    let trie: Trie = ["abc", "def", "abcdef"].into_iter().collect();

    let mut it = trie.begin(true);
    it.advance_forward().advance_forward();
    assert_eq!(it.get_key(), Ok("def"));

    it.advance_backward();
    assert_eq!(it.get_key(), Ok("abcdef"));
    it.advance_backward();
    assert_eq!(it.get_key(), Ok("abc"));
}

#[test]
fn test_remove_and_prune() {
    let mut trie: Trie = ["abc", "abcdef", "d", "def"].into_iter().collect();

    trie.remove("abcdef");
    trie.remove("d");
    trie.remove("c");

    assert_eq!(keys_of(&trie, true), ["abc", "def"]);
    assert_eq!(keys_of(&trie, false), ["a", "ab", "abc", "d", "de", "def"]);
}

#[test]
fn test_keyed_overwrite() {
    let mut map = KeyedTrie::new();
    map.insert("abc", 100);
    map.insert("abc", 200);
    assert_eq!(map.find("abc").get_value(), Ok(&200));
    assert_eq!(
        map.end().get_value(),
        Err(PrefixTreeError::NoCurrentElement)
    );
}

#[test]
fn test_tree_from_loaded_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tree.toml");
    std::fs::write(&path, "[tree]\nmax_key_len = 3\n").unwrap();

    let settings: Settings = ConfigLoader::new(Some(&path), "PREFIX_TREE_IT")
        .load()
        .unwrap();
    let mut map = KeyedTrie::with_config(settings.tree);

    assert!(map.insert("abc", "ok"));
    assert!(!map.insert("abcd", "too long"));
    assert_eq!(map.len(), 1);
    assert_eq!(map.config().max_key_len, 3);
}
