//! Integration tests for component registration, slots and composition

use std::rc::Rc;

use insta::assert_snapshot;
use pretty_assertions::assert_eq;

use viewkit::component::{ComponentDefinition, ComponentOptions};
use viewkit::slot::{resolve_slots, Fragment, Resolved, Slot};
use viewkit::value::{bag, DataBag};
use viewkit::{
    render_template, render_template_with_config, ComposeError, Instance, InstanceConfig,
    Registry, RenderConfig, RenderError,
};

#[test]
fn test_register_then_resolve_last_write_wins() {
    let mut registry = Registry::new();
    let first =
        registry.register("card", ComponentDefinition::builder().template("<div>one</div>"));
    assert!(Rc::ptr_eq(&first, &registry.resolve("card").expect("Should resolve")));

    let second =
        registry.register("card", ComponentDefinition::builder().template("<div>two</div>"));
    let resolved = registry.resolve("card").expect("Should resolve");
    assert!(Rc::ptr_eq(&second, &resolved));
    assert!(!Rc::ptr_eq(&first, &resolved));
    assert_eq!(resolved.template, "<div>two</div>");
}

#[test]
fn test_greeter_resolves_to_registered_definition() {
    let mut registry = Registry::new();
    let greeter = registry.register(
        "greeter",
        ComponentDefinition::builder()
            .template("<div>{{msg}}</div>")
            .data(|| bag([("msg", "hi")])),
    );

    let vm = Instance::create(
        InstanceConfig::new("#app").with_template("<greeter></greeter>"),
        &registry,
    );

    let resolved = vm.registry().resolve("greeter").expect("Should resolve");
    assert!(Rc::ptr_eq(&greeter, &resolved));
    assert_eq!(resolved.name, "greeter");
    assert_eq!(resolved.template, "<div>{{msg}}</div>");
    assert_eq!(resolved.data(), bag([("msg", "hi")]));
    assert_eq!(vm.render().expect("Should render"), "<div>hi</div>");
}

#[test]
fn test_literal_and_builder_paths_agree() {
    let mut registry = Registry::new();
    registry.register(
        "built",
        ComponentDefinition::builder()
            .prop("myMsg")
            .template("<div>{{ myMsg }}</div>"),
    );
    registry.register(
        "literal",
        ComponentOptions {
            template: "<div>{{ myMsg }}</div>".into(),
            props: vec!["myMsg".into()],
            ..Default::default()
        },
    );

    let data = DataBag::new();
    let built = render_template(r#"<built my-msg="x"></built>"#, &registry, &data)
        .expect("Should render");
    let literal = render_template(r#"<literal my-msg="x"></literal>"#, &registry, &data)
        .expect("Should render");
    assert_eq!(built, literal);
    assert_eq!(built, "<div>x</div>");
}

#[test]
fn test_slot_resolution_ignores_supply_order() {
    let slots = vec![
        Slot::named("one"),
        Slot::default_slot(),
        Slot::named("two"),
    ];
    let fragments = vec![
        Fragment::tagged("two", "Z"),
        Fragment::untagged("Y"),
        Fragment::tagged("one", "X"),
    ];

    let resolved = resolve_slots(&slots, &fragments);
    assert_eq!(
        resolved,
        vec![
            Resolved::Supplied("X"),
            Resolved::Supplied("Y"),
            Resolved::Supplied("Z"),
        ]
    );
}

#[test]
fn test_slot_without_match_yields_fallback() {
    let slots = vec![Slot::named("footer").with_fallback("F")];
    let fragments = vec![Fragment::tagged("header", "H")];
    assert_eq!(resolve_slots(&slots, &fragments), vec![Resolved::Fallback("F")]);
}

#[test]
fn test_named_slot_component_renders_in_declared_order() {
    let mut registry = Registry::new();
    registry.register(
        "named-slot",
        ComponentDefinition::builder().template(concat!(
            "<div>\n",
            "  <slot name=\"one\"></slot>\n",
            "  <slot></slot>\n",
            "  <slot name=\"two\"></slot>\n",
            "</div>",
        )),
    );

    let html = render_template_with_config(
        r#"<named-slot><p slot="one">One</p><p slot="two">Two</p><p>Default A</p></named-slot>"#,
        &registry,
        &DataBag::new(),
        &RenderConfig::new().with_pretty_print(true),
    )
    .expect("Should render");

    assert_snapshot!(html, @r###"
    <div>
      <p slot="one">One</p>
      <p>Default A</p>
      <p slot="two">Two</p>
    </div>
    "###);
}

#[test]
fn test_nested_local_components() {
    let mut registry = Registry::new();
    registry.register(
        "parent-sugar",
        ComponentOptions {
            template: "<div>parent sugar<child-sugar></child-sugar></div>".into(),
            components: vec![(
                "child-sugar".into(),
                ComponentDefinition::builder().template("<div>child sugar</div>").build(),
            )],
            ..Default::default()
        },
    );

    let html = render_template("<parent-sugar></parent-sugar>", &registry, &DataBag::new())
        .expect("Should render");
    assert_eq!(html, "<div>parent sugar<div>child sugar</div></div>");
    assert!(registry.resolve("child-sugar").is_none());
}

#[test]
fn test_instance_local_components_and_dynamic_view() {
    let registry = Registry::new();
    let mut vm = Instance::create(
        InstanceConfig::new("#example")
            .with_template(r#"<component :is="currentView"></component>"#)
            .with_data(bag([("currentView", "home")]))
            .component("home", ComponentDefinition::builder().template("<div>home</div>"))
            .component("posts", ComponentDefinition::builder().template("<div>posts</div>"))
            .component("archive", ComponentDefinition::builder().template("<div>archive</div>")),
        &registry,
    );

    assert_eq!(vm.render().expect("Should render"), "<div>home</div>");
    vm.set("currentView", "archive");
    assert_eq!(vm.render().expect("Should render"), "<div>archive</div>");
    vm.set("currentView", "missing");
    assert_eq!(vm.render().expect("Should render"), "");
}

#[test]
fn test_partial_in_instance_scope() {
    let mut registry = Registry::new();
    registry
        .register_partial("my-partial", "<p>This is a partial! {{ msg }}</p>")
        .expect("Should register");

    let vm = Instance::create(
        InstanceConfig::new("#app")
            .with_template(concat!(
                r#"<div><partial name="my-partial"></partial>"#,
                r#"<partial name="nope"></partial></div>"#,
            ))
            .with_data(bag([("msg", "message for partial")])),
        &registry,
    );
    assert_eq!(
        vm.render().expect("Should render"),
        "<div><p>This is a partial! message for partial</p></div>"
    );
}

#[test]
fn test_slot_under_unresolved_tag_does_not_shift_named_slots() {
    let mut registry = Registry::new();
    registry.register(
        "two-up",
        ComponentDefinition::builder().template(
            r#"<div><no-such-thing><slot name="a"/></no-such-thing><slot name="b"/></div>"#,
        ),
    );

    let html = render_template(
        r#"<two-up><p slot="a">A</p><p slot="b">B</p></two-up>"#,
        &registry,
        &DataBag::new(),
    )
    .expect("Should render");
    assert_eq!(html, r#"<div><p slot="b">B</p></div>"#);
}

#[test]
fn test_slots_inside_partial_are_filled() {
    let mut registry = Registry::new();
    registry
        .register_partial("head", r#"<h1><slot name="title"></slot></h1>"#)
        .expect("Should register");
    registry.register(
        "article-card",
        ComponentDefinition::builder()
            .template(r#"<div><partial name="head"></partial><slot></slot></div>"#),
    );

    let html = render_template(
        r#"<article-card><b slot="title">T</b><i>body</i></article-card>"#,
        &registry,
        &DataBag::new(),
    )
    .expect("Should render");
    assert_eq!(html, r#"<div><h1><b slot="title">T</b></h1><i>body</i></div>"#);
}

#[test]
fn test_self_including_partial_is_circular() {
    let mut registry = Registry::new();
    registry
        .register_partial("loop", r#"<p><partial name="loop"></partial></p>"#)
        .expect("Should register");

    let err = render_template(r#"<partial name="loop"></partial>"#, &registry, &DataBag::new())
        .expect_err("Should fail");
    match err {
        RenderError::Compose(ComposeError::CircularReference { chain }) => {
            assert_eq!(chain, "partial:loop -> partial:loop")
        }
        other => panic!("Expected circular reference, got {:?}", other),
    }
}

#[test]
fn test_partial_and_component_cycle_is_circular() {
    let mut registry = Registry::new();
    registry
        .register_partial("frame", "<section><framed-box></framed-box></section>")
        .expect("Should register");
    registry.register(
        "framed-box",
        ComponentDefinition::builder().template(r#"<div><partial name="frame"></partial></div>"#),
    );

    let err = render_template("<framed-box></framed-box>", &registry, &DataBag::new())
        .expect_err("Should fail");
    match err {
        RenderError::Compose(ComposeError::CircularReference { chain }) => {
            assert_eq!(chain, "framed-box -> partial:frame -> framed-box")
        }
        other => panic!("Expected circular reference, got {:?}", other),
    }
}
