// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test code readability over pedantic
#![allow(clippy::missing_panics_doc)] // Tests panic on failure

//! Randomized round-trip: compiling an encoded path and running it against
//! the provider gives the same text as calling the path directly.

mod common;

use common::{
    setup, ButtonsSectionPath, JobsSectionPath, LabelProvider, LabelProviderPath,
    TechnologiesSectionPath, UiSectionPath,
};
use tagpath::{Arg, LabelEncoder, Path, PathExpr};

const ITERATIONS: usize = 500;

fn random_word(rng: &mut fastrand::Rng) -> String {
    let len = rng.usize(0..12);
    (0..len).map(|_| rng.alphanumeric()).collect()
}

/// A random taggable path and the text evaluating it directly yields.
fn random_case(rng: &mut fastrand::Rng, provider: &LabelProvider) -> (PathExpr, String) {
    let root = Path::<LabelProvider>::root();
    match rng.u8(0..6) {
        0 => (root.jobs().qa(), provider.jobs().qa().to_string()),
        1 => (root.jobs().pm(), provider.jobs().pm()),
        2 => {
            let xp = random_word(rng);
            let expected = provider.jobs().dev(xp.clone());
            (root.jobs().dev(xp), expected)
        }
        3 => {
            let (asp, ef, blazor) = (rng.bool(), rng.bool(), rng.bool());
            (
                root.technologies().csharp(asp, ef, blazor),
                provider.technologies().csharp(asp, ef, blazor),
            )
        }
        4 => (root.ui().buttons().ok(), provider.ui().buttons().ok().to_string()),
        _ => {
            let item = random_word(rng);
            let count = rng.u32(..10_000);
            let ratio = f64::from(rng.u8(..100)) / 10.0;
            let expected = provider.ui().buttons().save(item.clone(), count, ratio);
            // Mix literal and captured argument shapes.
            let expr = if rng.bool() {
                root.ui().buttons().save(item, count, ratio)
            } else {
                root.ui()
                    .buttons()
                    .save(Arg::<String>::captured("item", item), count, ratio)
            };
            (expr, expected)
        }
    }
}

#[test]
fn test_randomized_round_trip() {
    let (registry, compiler) = setup();
    let encoder = LabelEncoder::new(&registry);
    let provider = LabelProvider::default();
    let mut rng = fastrand::Rng::with_seed(0x7a67_7061_7468);

    for i in 0..ITERATIONS {
        let (expr, expected) = random_case(&mut rng, &provider);
        let label = encoder
            .encode(&expr)
            .unwrap()
            .unwrap_or_else(|| panic!("iteration {}: {} not taggable", i, expr));
        let consumer = compiler.build(&label).unwrap().unwrap();
        assert_eq!(
            consumer.get_label(&provider).unwrap(),
            expected,
            "iteration {}: {}",
            i,
            label
        );
    }

    // Six distinct identifiers, whatever the argument values.
    assert_eq!(compiler.compilations(), 6);
}
