//! Distribution checks for generated passwords.
//!
//! Character selection is class-uniform: each of the three classes is drawn
//! with probability 1/3 regardless of its size. Over a large sample the class
//! shares therefore converge to 1/3 each, and a single digit (1/30) is 5.2x
//! as frequent as a single letter (1/156).
//!
//! Thresholds are several standard deviations wide so natural variance does
//! not cause false failures; they still catch a size-weighted picker, which
//! would put letters at ~55%.

use std::collections::HashMap;

use passgen_core::catalog::{CharacterCatalog, CharacterClass};
use passgen_core::password::{ExclusionSet, PasswordEngine};
use passgen_core::picker::CharacterPicker;
use passgen_core::random::OsRandom;

const SAMPLES: usize = 60_000;

#[allow(clippy::cast_precision_loss)]
fn share(count: usize, total: usize) -> f64 {
    count as f64 / total as f64
}

#[test]
fn picker_class_shares_converge_to_one_third() {
    let catalog = CharacterCatalog::build();
    let picker = CharacterPicker::new(&catalog, &OsRandom);
    let mut counts: HashMap<CharacterClass, usize> = HashMap::new();
    for _ in 0..SAMPLES {
        let c = picker.pick().unwrap();
        *counts.entry(catalog.classify(c).unwrap()).or_default() += 1;
    }
    for class in CharacterClass::ALL {
        let s = share(counts[&class], SAMPLES);
        assert!(
            (s - 1.0 / 3.0).abs() < 0.02,
            "{class:?} share {s:.4} (expected ~0.3333)"
        );
    }
}

#[test]
fn digit_more_frequent_than_letter() {
    let pw = PasswordEngine::new()
        .generate_plain(60_000, &ExclusionSet::new(), false)
        .unwrap();
    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in pw.chars() {
        *freq.entry(c).or_default() += 1;
    }
    let digit_avg = share((b'0'..=b'9').map(|b| freq[&char::from(b)]).sum(), 10);
    let letter_avg = share(
        (b'A'..=b'Z')
            .chain(b'a'..=b'z')
            .map(|b| freq.get(&char::from(b)).copied().unwrap_or(0))
            .sum(),
        52,
    );
    let ratio = digit_avg / letter_avg;
    assert!(
        (4.2..6.4).contains(&ratio),
        "digit/letter frequency ratio {ratio:.3} (expected ~5.2)"
    );
}

#[test]
fn every_catalog_character_is_reachable() {
    let catalog = CharacterCatalog::shared();
    let pw = PasswordEngine::new()
        .generate_plain(20_000, &ExclusionSet::new(), true)
        .unwrap();
    for item in catalog.iter() {
        assert!(
            pw.contains(item.character()),
            "{} never generated",
            item.character()
        );
    }
}

#[test]
fn excluding_a_class_redistributes_to_the_rest() {
    let catalog = CharacterCatalog::shared();
    let no_digits: ExclusionSet = catalog
        .alphabet(CharacterClass::Digit)
        .iter()
        .map(|item| item.character())
        .collect();
    let pw = PasswordEngine::new()
        .generate_plain(30_000, &no_digits, false)
        .unwrap();
    let letters = pw.chars().filter(char::is_ascii_alphabetic).count();
    let s = share(letters, 30_000);
    assert!((s - 0.5).abs() < 0.02, "letter share {s:.4} (expected ~0.5)");
}
