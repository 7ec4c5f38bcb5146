// File: crates/drops-core/tests/legend.rs
// Purpose: Legend row order, loud failure on unknown categories, and the out-of-band value slots.

use drops_core::{CategoryMetadata, ConfigError, LegendOverlay, StaticRegistry};

fn registry() -> StaticRegistry {
    StaticRegistry::new()
        .with("afk", CategoryMetadata::new("AFK", "#f5a623", "#b37400"))
        .with("ban", CategoryMetadata::new("Banned", "#d0021b", "#8b0012"))
        .with("idle", CategoryMetadata::new("Idle", "rgb(74, 144, 226)", "#1f5fa8"))
}

fn ids(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn rows_are_reverse_of_display_order() {
    let legend = LegendOverlay::build(&ids(&["afk", "ban", "idle"]), &registry()).unwrap();
    let order: Vec<&str> = legend.ids().collect();
    assert_eq!(order, vec!["idle", "ban", "afk"]);

    let first = &legend.rows()[0];
    assert_eq!(first.label, "Idle");
    assert_eq!(first.color, "rgb(74, 144, 226)");
    assert_eq!(first.border, "#1f5fa8");
    assert_eq!(first.slot().text(), "");
}

#[test]
fn empty_category_list_renders_nothing() {
    let legend = LegendOverlay::build(&[], &registry()).unwrap();
    assert!(legend.is_empty());
    assert!(legend.slots().is_empty());
}

#[test]
fn unknown_category_fails_the_whole_legend() {
    let err = LegendOverlay::build(&ids(&["afk", "timeout"]), &registry()).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownCategory(ref id) if id == "timeout"));
    assert!(err.to_string().contains("timeout"));
}

#[test]
fn duplicate_category_is_rejected() {
    let err = LegendOverlay::build(&ids(&["afk", "afk"]), &registry()).unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateCategory(_)));
}

#[test]
fn slot_writes_are_visible_through_rows() {
    let legend = LegendOverlay::build(&ids(&["afk", "ban"]), &registry()).unwrap();
    let slots = legend.slots();
    assert!(slots.write("ban", 3.0));
    assert!(slots.write("afk", 2.5));
    assert!(!slots.write("idle", 1.0));

    assert_eq!(legend.row("ban").unwrap().slot().text(), "3");
    assert_eq!(legend.row("afk").unwrap().slot().text(), "2.5");

    // Last writer wins.
    slots.write("ban", 7.0);
    assert_eq!(legend.row("ban").unwrap().slot().get(), Some(7.0));

    slots.clear_all();
    assert!(legend.rows().iter().all(|r| r.slot().get().is_none()));
}

#[test]
fn legend_starts_hidden_and_ignores_pointer() {
    let legend = LegendOverlay::build(&ids(&["afk"]), &registry()).unwrap();
    assert!(!legend.opacity().is_visible());
    assert!(!legend.pointer_events());

    legend.opacity().set(1.5);
    assert_eq!(legend.opacity().get(), 1.0);
    legend.opacity().set(f32::NAN);
    assert!(!legend.opacity().is_visible());
}

#[test]
fn matches_compares_display_order() {
    let legend = LegendOverlay::build(&ids(&["afk", "ban"]), &registry()).unwrap();
    assert!(legend.matches(&ids(&["afk", "ban"])));
    assert!(!legend.matches(&ids(&["ban", "afk"])));
    assert!(!legend.matches(&ids(&["afk"])));
}
