use mofx_core::diff::{align_lines, DEFAULT_MAX_LINE_LEN};
use mofx_core::normalize::{equivalent, normalize};
use proptest::prelude::*;

fn version() -> impl Strategy<Value = String> {
    (0u8..20, 0u8..40, 0u8..10).prop_map(|(a, b, c)| format!("{a}.{b}.{c}"))
}

proptest! {
    #[test]
    fn normalize_is_idempotent(s in ".{0,60}") {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_is_idempotent_on_mof_like_values(
        s in r#"["' ]{0,2}[A-Za-z\\:/._-]{0,20}(PowerStig[\\/_-]v?[0-9.]{1,6}[\\/_-]?)?[A-Za-z;'" ]{0,4}"#
    ) {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn equivalent_is_symmetric(a in ".{0,30}", b in ".{0,30}") {
        prop_assert_eq!(
            equivalent(Some(&a), Some(&b)),
            equivalent(Some(&b), Some(&a))
        );
    }

    #[test]
    fn powerstig_path_versions_are_equivalent(v1 in version(), v2 in version()) {
        let a = format!(r"C:\\Modules\\PowerStig\\{v1}\\DSCResources\\Registry.ps1");
        let b = format!(r"C:\\Modules\\PowerStig\\{v2}\\DSCResources\\Registry.ps1");
        prop_assert!(equivalent(Some(&a), Some(&b)));
    }

    #[test]
    fn alignment_preserves_both_sequences(
        lines1 in proptest::collection::vec("[a-c]{1,2}", 0..12),
        lines2 in proptest::collection::vec("[a-c]{1,2}", 0..12),
    ) {
        let pairs = align_lines(&lines1, &lines2, DEFAULT_MAX_LINE_LEN);

        let left: Vec<String> = pairs.iter().filter_map(|p| p.line_from_doc1.clone()).collect();
        let right: Vec<String> = pairs.iter().filter_map(|p| p.line_from_doc2.clone()).collect();
        prop_assert_eq!(left, lines1.clone());
        prop_assert_eq!(right, lines2.clone());

        for pair in &pairs {
            if let (Some(a), Some(b)) = (&pair.line_from_doc1, &pair.line_from_doc2) {
                prop_assert_eq!(a, b);
                prop_assert!(!pair.changed);
            }
        }
    }

    #[test]
    fn identical_sequences_align_unchanged(lines in proptest::collection::vec("[a-z ]{1,8}", 0..16)) {
        let pairs = align_lines(&lines, &lines, DEFAULT_MAX_LINE_LEN);
        prop_assert_eq!(pairs.len(), lines.len());
        prop_assert!(pairs.iter().all(|p| !p.changed));
    }
}
