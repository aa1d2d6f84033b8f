//! # Replication Lifecycle Flows
//!
//! Exercises the adapter the way the replication engine drives it across
//! process restarts: ordered blocks, file-backed commits, and a fresh
//! adapter restored from the persisted bytes.

#[cfg(test)]
mod tests {
    use cas_02_replication_adapter::{FileSink, ReplicationAdapter, ReplicationHooks};
    use shared_types::{CODE_CAS_FAILURE, CODE_NOT_FOUND, CODE_OK};
    use std::fs::File;
    use std::path::Path;

    fn file_backed_adapter(path: &Path) -> ReplicationAdapter {
        let initial = File::open(path).ok();
        let sink = Box::new(FileSink::new(path));
        match initial {
            Some(mut file) => ReplicationAdapter::new(Some(&mut file), sink).unwrap(),
            None => ReplicationAdapter::new(None, sink).unwrap(),
        }
    }

    #[test]
    fn test_restart_replays_to_identical_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");

        let first_digest;
        {
            let adapter = file_backed_adapter(&path);

            adapter.begin_block();
            assert_eq!(adapter.ordered_apply(b"alpha::1").code, CODE_OK);
            assert_eq!(adapter.ordered_apply(b"beta::2").code, CODE_OK);
            adapter.end_block();
            adapter.block_commit().unwrap();

            adapter.begin_block();
            assert_eq!(adapter.ordered_apply(b"alpha:1:10").code, CODE_OK);
            adapter.end_block();
            first_digest = adapter.block_commit().unwrap().digest;
        }

        // A new process over the same file reports the same replay point.
        let restarted = file_backed_adapter(&path);
        let info = restarted.info();
        assert_eq!(info.last_commit, 2);
        assert_eq!(info.digest, first_digest);
        assert_eq!(restarted.query(b"alpha").value, b"10");
        assert_eq!(restarted.query(b"beta").value, b"2");
    }

    #[test]
    fn test_uncommitted_tail_is_lost_on_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");

        {
            let adapter = file_backed_adapter(&path);

            adapter.begin_block();
            adapter.ordered_apply(b"a::one");
            adapter.ordered_apply(b"a:one:two");
            adapter.ordered_apply(b"a:two:three");
            adapter.ordered_apply(b"b::foo");
            assert_eq!(adapter.ordered_apply(b"b::bar").code, CODE_CAS_FAILURE);
            adapter.end_block();
            adapter.block_commit().unwrap();

            // Delivered in the next block but never committed.
            adapter.begin_block();
            assert_eq!(adapter.ordered_apply(b"a:three:four").code, CODE_OK);
            assert_eq!(adapter.query(b"a").value, b"four");
        }

        let restarted = file_backed_adapter(&path);
        assert_eq!(restarted.query(b"a").value, b"three");
        assert_eq!(restarted.query(b"b").value, b"foo");
        assert_eq!(restarted.info().last_commit, 1);
    }

    #[test]
    fn test_prefilter_disagreement_does_not_affect_committed_state() {
        let dir = tempfile::tempdir().unwrap();
        let adapter = file_backed_adapter(&dir.path().join("db.json"));

        // The provisional view accepts a create, staling itself...
        assert_eq!(adapter.pre_validate(b"k::from-prefilter").code, CODE_OK);
        // ...and now disagrees with the ordered outcome space.
        assert_eq!(
            adapter.pre_validate(b"k::from-consensus").code,
            CODE_CAS_FAILURE
        );

        // Ordering delivers a different create; authoritative accepts it.
        adapter.begin_block();
        assert_eq!(adapter.ordered_apply(b"k::from-consensus").code, CODE_OK);
        adapter.end_block();
        adapter.block_commit().unwrap();

        // Committed truth wins everywhere, including the reconciled
        // provisional view.
        assert_eq!(adapter.query(b"k").value, b"from-consensus");
        assert_eq!(adapter.pre_validate(b"k::anything").code, CODE_CAS_FAILURE);
        assert_eq!(
            adapter.pre_validate(b"k:from-consensus:next").code,
            CODE_OK
        );
    }

    #[test]
    fn test_query_codes_from_a_fresh_store() {
        let dir = tempfile::tempdir().unwrap();
        let adapter = file_backed_adapter(&dir.path().join("db.json"));

        assert_eq!(adapter.query(b"nothing").code, CODE_NOT_FOUND);
        assert_eq!(adapter.info().last_commit, 0);
    }
}
