//! Property-based tests for exclude-file merging.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::exclude::{exclude_file_path, new_entries, read_lines, update_exclude_file};
    use proptest::prelude::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn pattern() -> impl Strategy<Value = String> {
        "[a-z]{1,3}(/[a-z]{1,3})?"
    }

    // ============================================================================
    // new_entries property tests
    // ============================================================================

    proptest! {
        /// Property: new_entries never returns a line twice
        #[test]
        fn new_entries_has_no_duplicates(
            existing in prop::collection::vec(pattern(), 0..8),
            candidates in prop::collection::vec(pattern(), 0..12),
        ) {
            let added = new_entries(&existing, &candidates);
            let unique: HashSet<&String> = added.iter().collect();
            prop_assert_eq!(unique.len(), added.len());
        }

        /// Property: new_entries never returns a line already present
        #[test]
        fn new_entries_excludes_existing(
            existing in prop::collection::vec(pattern(), 0..8),
            candidates in prop::collection::vec(pattern(), 0..12),
        ) {
            let added = new_entries(&existing, &candidates);
            for line in &added {
                prop_assert!(!existing.contains(line), "'{}' was already present", line);
            }
        }

        /// Property: every candidate ends up either existing or added
        #[test]
        fn new_entries_covers_all_candidates(
            existing in prop::collection::vec(pattern(), 0..8),
            candidates in prop::collection::vec(pattern(), 0..12),
        ) {
            let added = new_entries(&existing, &candidates);
            for candidate in &candidates {
                prop_assert!(existing.contains(candidate) || added.contains(candidate));
            }
        }
    }

    // ============================================================================
    // update_exclude_file property tests
    // ============================================================================

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Property: the file keeps its previous lines as a prefix
        #[test]
        fn update_keeps_existing_prefix(
            existing in prop::collection::vec(pattern(), 0..6),
            candidates in prop::collection::vec(pattern(), 0..8),
        ) {
            let temp_dir = TempDir::new().unwrap();
            if !existing.is_empty() {
                update_exclude_file(temp_dir.path(), &existing).unwrap();
            }
            let before = read_lines(&exclude_file_path(temp_dir.path())).unwrap();

            let added = update_exclude_file(temp_dir.path(), &candidates).unwrap();
            let after = read_lines(&exclude_file_path(temp_dir.path())).unwrap();

            prop_assert_eq!(&after[..before.len()], &before[..]);
            prop_assert_eq!(&after[before.len()..], &added[..]);
        }

        /// Property: applying the same candidates twice adds nothing the second time
        #[test]
        fn update_twice_is_idempotent(candidates in prop::collection::vec(pattern(), 0..8)) {
            let temp_dir = TempDir::new().unwrap();
            update_exclude_file(temp_dir.path(), &candidates).unwrap();
            let second = update_exclude_file(temp_dir.path(), &candidates).unwrap();
            prop_assert!(second.is_empty());
        }
    }
}
