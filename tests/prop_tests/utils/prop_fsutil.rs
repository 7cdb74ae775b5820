use proptest::prelude::*;

proptest! {
    #![proptest_config(proptest::test_runner::Config {
        failure_persistence: Some(Box::new(proptest::test_runner::FileFailurePersistence::WithSource("proptest-regressions"))),
        cases: 24,
        .. proptest::test_runner::Config::default()
    })]
    #[test]
    fn prop_split_components_counts_named_parts(parts in proptest::collection::vec("[A-Za-z0-9_-]{1,10}", 0..6), dots in 0usize..3) {
        use temptrack::fsutil::split_components;
        let mut raw = Vec::new();
        for p in &parts {
            raw.extend(std::iter::repeat_n(".".to_string(), dots));
            raw.push(p.clone());
        }
        let joined = raw.join(std::path::MAIN_SEPARATOR_STR);
        let out = split_components(std::path::Path::new(&joined)).unwrap();
        prop_assert_eq!(out.len(), parts.len());
        for (o, p) in out.iter().zip(&parts) {
            prop_assert_eq!(o.to_str(), Some(p.as_str()));
        }
    }

    #[test]
    fn prop_write_truncate_keeps_only_last(first in "[a-z]{0,64}", second in "[a-z]{0,64}") {
        use temptrack::fsutil::write_truncate;
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("f.txt");
        write_truncate(&p, first.as_bytes()).unwrap();
        write_truncate(&p, second.as_bytes()).unwrap();
        prop_assert_eq!(std::fs::read_to_string(&p).unwrap(), second);
    }
}
