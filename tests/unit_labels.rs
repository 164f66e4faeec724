// Unit tests for label normalization, taxonomy and duplicate grouping.
//
// Tests the pure label functions through the public API: normalize_label
// idempotency over a spread of real-world export names, group partitioning,
// canonical selection and the consolidated list.

use studydeck::dedup::{canonical_label, consolidate, find_duplicates, group_key, group_labels};
use studydeck::labels::category::{Category, Domain};
use studydeck::labels::normalize::{display_name, normalize_label};
use studydeck::labels::reader::{parse_labels, LabelFilter};
use studydeck::labels::Transcript;

fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

const SAMPLES: &[&str] = &[
    "AZ-104 Storage Overview.wav",
    "AZ-104_Storage_Overview_(1).wav",
    "NSG Rules.wav (2)",
    "  Load  Balancer -- Health Probes v2.mp3 ",
    "Azure_Backup_Vault_version 3.m4a",
    "Container Apps (copy).txt",
    "Key Vault (copy) (1).wav",
    "az104/Module 3/VNet Peering.wav",
    "Étude_Réseau_v1.2.flac",
    "___",
    "",
    "v2",
    "Monitor Alerts.WAV",
];

// ============================================================
// normalize_label
// ============================================================

#[test]
fn normalize_is_idempotent() {
    for sample in SAMPLES {
        let once = normalize_label(sample);
        let twice = normalize_label(&once);
        assert_eq!(once, twice, "normalize not idempotent for {sample:?}");
    }
}

#[test]
fn normalize_output_has_no_separators_or_uppercase() {
    for sample in SAMPLES {
        let key = normalize_label(sample);
        assert!(!key.contains('_'), "underscore left in {key:?}");
        assert!(!key.contains("  "), "double space left in {key:?}");
        assert_eq!(key, key.trim(), "untrimmed key {key:?}");
        assert_eq!(key, key.to_lowercase(), "uppercase left in {key:?}");
    }
}

#[test]
fn export_variants_share_a_key() {
    assert_eq!(
        normalize_label("AZ-104 Storage Overview.wav"),
        normalize_label("AZ-104_Storage_Overview_(1).wav")
    );
    assert_eq!(
        normalize_label("Key Vault.wav"),
        normalize_label("Key Vault (copy) (1).wav")
    );
    assert_eq!(normalize_label("Monitor Alerts.WAV"), "monitor alerts");
}

#[test]
fn unknown_extension_is_kept() {
    assert_eq!(normalize_label("notes.docx"), "notes.docx");
}

#[test]
fn display_name_takes_final_component() {
    assert_eq!(display_name("./az104/Module 3/VNet Peering.wav"), "VNet Peering.wav");
    assert_eq!(display_name(r"az104\VNet.wav"), "VNet.wav");
    assert_eq!(display_name("VNet.wav"), "VNet.wav");
}

// ============================================================
// Grouping
// ============================================================

#[test]
fn groups_partition_every_occurrence() {
    let input = labels(SAMPLES);
    let groups = group_labels(&input);

    let mut flattened: Vec<String> = groups.iter().flat_map(|g| g.labels.clone()).collect();
    let mut expected = input.clone();
    flattened.sort();
    expected.sort();
    assert_eq!(flattened, expected, "groups must partition the input");

    for group in &groups {
        for label in &group.labels {
            assert_eq!(group_key(label), group.key, "{label:?} in wrong group");
        }
    }
}

#[test]
fn repeated_identical_labels_stay_separate_occurrences() {
    let input = labels(&["VNet.wav", "VNet.wav", "VNet.wav"]);
    let groups = group_labels(&input);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].labels.len(), 3);
    assert_eq!(find_duplicates(&input)["vnet"].len(), 3);
}

#[test]
fn find_duplicates_only_keeps_multi_member_keys() {
    let input = labels(&[
        "AZ-104 Storage Overview.wav",
        "AZ-104_Storage_Overview_(1).wav",
        "Key Vault.wav",
    ]);
    let dups = find_duplicates(&input);
    assert_eq!(dups.len(), 1);
    assert!(dups.contains_key("az 104 storage overview"));
    assert!(dups.values().all(|members| members.len() > 1));
}

#[test]
fn canonical_is_longest_original() {
    let input = labels(&["AZ-104 Storage Overview.wav", "AZ-104_Storage_Overview_(1).wav"]);
    assert_eq!(canonical_label(&input), Some("AZ-104_Storage_Overview_(1).wav"));
    assert_eq!(canonical_label(&[]), None);
}

#[test]
fn consolidate_keeps_one_per_key_sorted() {
    let input = labels(&[
        "Key Vault.wav",
        "AZ-104 Storage Overview.wav",
        "AZ-104_Storage_Overview_(1).wav",
        "Key Vault (copy).wav",
        "Bastion.wav",
    ]);
    let kept = consolidate(&input);
    assert_eq!(
        kept,
        labels(&[
            "AZ-104_Storage_Overview_(1).wav",
            "Bastion.wav",
            "Key Vault (copy).wav",
        ])
    );
}

// ============================================================
// Reader and taxonomy
// ============================================================

#[test]
fn parse_labels_filters_by_course() {
    let text = "# listing\n./AZ-104 Storage.wav\n\nAZ-900 Basics.wav\naz104_NSG.wav\n";
    let filter = LabelFilter::parse("az-104, az104");
    assert_eq!(
        parse_labels(text, &filter),
        labels(&["AZ-104 Storage.wav", "az104_NSG.wav"])
    );
}

#[test]
fn transcript_derives_category_and_domain() {
    let t = Transcript::new("./az104/Blob Lifecycle Rules.wav");
    assert_eq!(t.name, "Blob Lifecycle Rules.wav");
    assert_eq!(t.title(), "Blob Lifecycle Rules");
    assert_eq!(t.category, Category::Storage);
    assert_eq!(t.domain(), Domain::Storage);
}

#[test]
fn every_category_has_a_name() {
    for category in Category::ALL {
        assert!(!category.as_str().is_empty());
        assert_eq!(category.to_string(), category.as_str());
    }
}
