// Karamap Resolver Scenarios
//
// End-to-end checks of the resolver and coverage analysis on small rule
// tables and on the built-in table.
//
// Run with: cargo test --test resolver_scenarios

use karamap_core::modifier::{Modifier, ModifierKey, ModifierSet, Side};
use karamap_core::resolve::{analyze, coverage::unmentioned, ModifierState, Resolver};
use karamap_core::table::default_rules;
use karamap_core::{Combo, Directive, KeyCode, RemapRule};

// =========================================================================
// Test Helpers
// =========================================================================

fn bare(key: KeyCode) -> Combo {
    Combo::key_only(key)
}

fn shifted(key: KeyCode) -> Combo {
    Combo::from_single(Modifier::Shift, key)
}

fn directives_for(directives: &[Directive], key: KeyCode) -> Vec<&Directive> {
    directives.iter().filter(|d| d.source == key).collect()
}

/// The small layout fix used throughout: `[` on shift+2 and `^`/`~` on hyphen
fn symbol_fix_rules() -> Vec<RemapRule> {
    vec![
        RemapRule::new(shifted(KeyCode::Num2), bare(KeyCode::OpenBracket)),
        RemapRule::new(bare(KeyCode::Hyphen), bare(KeyCode::EqualSign)),
        RemapRule::new(shifted(KeyCode::Hyphen), shifted(KeyCode::EqualSign)),
    ]
}

// =========================================================================
// Documented scenario
// =========================================================================

#[test]
fn test_symbol_fix_directives() {
    let directives = Resolver::default().resolve(&symbol_fix_rules());
    assert_eq!(directives.len(), 3);

    // shift+2: shift required, the rest don't care
    let two = &directives[0];
    assert_eq!(two.source, KeyCode::Num2);
    assert_eq!(two.modifiers.state(Modifier::Shift), ModifierState::Required(Side::Either));
    for m in [Modifier::Option, Modifier::Control, Modifier::Command] {
        assert_eq!(two.modifiers.state(m), ModifierState::DontCare);
    }
    assert_eq!(two.target.key(), KeyCode::OpenBracket);

    // hyphen alone: shift forbidden so shift+hyphen reaches the second rule
    let hyphen = &directives[1];
    assert_eq!(hyphen.modifiers.state(Modifier::Shift), ModifierState::Forbidden);
    assert_eq!(hyphen.modifiers.dont_care_set(), ModifierSet::all() - ModifierSet::SHIFT);
    assert_eq!(hyphen.target.key(), KeyCode::EqualSign);

    let shift_hyphen = &directives[2];
    assert_eq!(shift_hyphen.modifiers.required_set(), ModifierSet::SHIFT);
    assert_eq!(shift_hyphen.modifiers.dont_care_set(), ModifierSet::all() - ModifierSet::SHIFT);
    assert_eq!(shift_hyphen.target.combo, shifted(KeyCode::EqualSign));
}

#[test]
fn test_every_modifier_mentioned_per_key() {
    let directives = Resolver::default().resolve(&symbol_fix_rules());
    let report = analyze(&directives);
    for key in report.keys() {
        assert!(unmentioned(key).is_empty(), "{} leaves modifiers unmentioned", key.source);
        assert_eq!(key.mentioned, ModifierSet::all());
    }
}

#[test]
fn test_two_way_collision_never_overlaps() {
    let directives = Resolver::default().resolve(&symbol_fix_rules());
    let hyphen = directives_for(&directives, KeyCode::Hyphen);
    for held in ModifierSet::combinations() {
        let firing = hyphen.iter().filter(|d| d.matches(held)).count();
        assert_eq!(firing, 1, "hyphen with {} fires {} directives", held, firing);
    }
}

#[test]
fn test_resolution_is_idempotent() {
    let resolver = Resolver::default();
    let rules = default_rules();
    assert_eq!(resolver.resolve(&rules), resolver.resolve(&rules));
}

#[test]
fn test_group_order_preserved() {
    let rules = vec![
        RemapRule::new(shifted(KeyCode::A), bare(KeyCode::B)),
        RemapRule::new(bare(KeyCode::C), bare(KeyCode::D)),
        RemapRule::new(bare(KeyCode::A), bare(KeyCode::E)),
    ];
    let directives = Resolver::default().resolve(&rules);

    // Keys in first-appearance order, rules within a key in declaration order
    let order: Vec<(KeyCode, KeyCode)> = directives
        .iter()
        .map(|d| (d.source, d.target.key()))
        .collect();
    assert_eq!(
        order,
        vec![
            (KeyCode::A, KeyCode::B),
            (KeyCode::A, KeyCode::E),
            (KeyCode::C, KeyCode::D),
        ]
    );
}

// =========================================================================
// Tap/hold
// =========================================================================

#[test]
fn test_tap_alone_unchanged_by_lazy_flag() {
    let rules = vec![RemapRule::tap_hold(
        bare(KeyCode::JapanesePcNfer),
        bare(KeyCode::LeftCommand),
        bare(KeyCode::Escape),
    )];

    for lazy in [true, false] {
        let directives = Resolver::new(lazy).resolve(&rules);
        assert_eq!(
            directives[0].target_if_alone.as_ref(),
            rules[0].target_if_alone(),
            "tap target changed with lazy = {}",
            lazy
        );
    }

    let lazy = Resolver::new(true).resolve(&rules);
    assert_eq!(lazy[0].target.options.lazy, Some(true));
    let eager = Resolver::new(false).resolve(&rules);
    assert_eq!(eager[0].target.options.lazy, None);
}

#[test]
fn test_lazy_flag_skips_plain_rules() {
    let directives = Resolver::new(true).resolve(&symbol_fix_rules());
    assert!(directives.iter().all(|d| d.target.options.lazy.is_none()));
}

// =========================================================================
// Three-way collision
// =========================================================================

#[test]
fn test_three_way_collision_leaves_gaps() {
    let rules = vec![
        RemapRule::new(bare(KeyCode::Quote), bare(KeyCode::A)),
        RemapRule::new(shifted(KeyCode::Quote), bare(KeyCode::B)),
        RemapRule::new(
            Combo::new(
                [
                    ModifierKey::either(Modifier::Shift),
                    ModifierKey::either(Modifier::Option),
                ],
                KeyCode::Quote,
            ),
            bare(KeyCode::C),
        ),
    ];
    let directives = Resolver::default().resolve(&rules);

    // The bare rule forbids option, the shift rule forbids option too, so
    // option without shift reaches no directive
    let report = analyze(&directives);
    let quote = report.get(KeyCode::Quote).unwrap();
    assert!(quote.overlaps.is_empty());
    assert_eq!(
        quote.gaps,
        vec![
            ModifierSet::OPTION,
            ModifierSet::OPTION | ModifierSet::CONTROL,
            ModifierSet::OPTION | ModifierSet::COMMAND,
            ModifierSet::OPTION | ModifierSet::CONTROL | ModifierSet::COMMAND,
        ]
    );
    assert!(!quote.is_consistent());
    assert!(report.has_gaps());
}

// =========================================================================
// Built-in table
// =========================================================================

#[test]
fn test_builtin_table_is_consistent() {
    let report = analyze(&Resolver::default().resolve(&default_rules()));
    assert!(!report.has_overlaps(), "{}", report);
    assert!(!report.has_gaps(), "{}", report);
    assert_eq!(report.problems().count(), 0);
}

#[test]
fn test_builtin_thumb_keys_are_lazy() {
    let directives = Resolver::default().resolve(&default_rules());
    for key in [
        KeyCode::Spacebar,
        KeyCode::JapanesePcNfer,
        KeyCode::JapanesePcXfer,
        KeyCode::LeftOption,
        KeyCode::JapanesePcKatakana,
    ] {
        let group = directives_for(&directives, key);
        assert_eq!(group.len(), 1, "{}", key);
        assert_eq!(group[0].target.options.lazy, Some(true), "{}", key);
        assert!(group[0].target_if_alone.is_some(), "{}", key);
    }
}
