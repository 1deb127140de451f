//! Integration tests for loading an app from a TOML manifest

use std::path::Path;

use insta::assert_snapshot;

use viewkit::transition::{ElementId, Phase, TransitionSequencer};
use viewkit::{Manifest, RenderConfig};

fn load() -> Manifest {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/hello.toml");
    Manifest::from_file(&path).expect("Should load fixture")
}

#[test]
fn test_fixture_registrations() {
    let manifest = load();
    assert_eq!(manifest.name.as_deref(), Some("hello"));
    assert_eq!(manifest.instance.el, "#example");

    let registry = &manifest.registry;
    assert_eq!(
        registry.components().names(),
        vec!["my-component", "parent-component", "single-slot", "sugar-component"]
    );
    assert!(registry.resolve("child-component").is_none());
    assert_eq!(registry.partials().names(), vec!["my-partial"]);
    assert_eq!(registry.transitions().names(), vec!["expand", "fade"]);
}

#[test]
fn test_fixture_renders() {
    let manifest = load();
    let html = manifest
        .mount()
        .render_with_config(&RenderConfig::new().with_pretty_print(true))
        .expect("Should render");

    assert_snapshot!(html, @r###"
    <div>
      <div>A custom component!</div>
      <div>hello, registration sugar!!</div>
      <div>
        Parent div
        <div>Child only available in Parent</div>
      </div>
      <div>
        <h1>This is my component!</h1>
        No content.
      </div>
      <div>
        <h1>This is my component!</h1>
        <p>!!</p>
      </div>
      <p>This is a partial! partial data</p>
      <div>posts</div>
    </div>
    "###);
}

#[test]
fn test_fixture_mount_wrapper() {
    let manifest = load();
    let html = manifest
        .mount()
        .render_with_config(&RenderConfig::new().with_wrap_mount(true))
        .expect("Should render");
    assert!(html.starts_with(r#"<div id="example"><div>"#));
    assert!(html.ends_with("</div></div>"));
}

#[test]
fn test_fixture_transitions_drive_sequencer() {
    let manifest = load();
    let sequencer = TransitionSequencer::new(manifest.registry.transitions());

    sequencer.on_insert(ElementId(1), "expand");
    assert_eq!(sequencer.phase(ElementId(1)), Phase::Entering);
    sequencer.on_remove(ElementId(1), "expand");
    assert_eq!(sequencer.active_class(ElementId(1)).as_deref(), Some("customLeaveClassName"));
    assert!(sequencer.on_transition_end(ElementId(1)));

    // No hooks and not CSS-driven: finishes at once
    sequencer.on_insert(ElementId(2), "fade");
    assert_eq!(sequencer.phase(ElementId(2)), Phase::Idle);
}
