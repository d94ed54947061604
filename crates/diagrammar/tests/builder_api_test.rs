//! Integration tests for the builder API
//!
//! Built structures render to text the parsers accept, and that text is a
//! fixed point of the formatter.

use diagrammar::{
    BuildOptions, Diagram, DiagrammarError, RenderOptions, builder, parse, render,
    structure::{
        Direction,
        class::{ClassNode, ClassRelation},
        flowchart::{FlowLink, FlowNode, NodeShape},
        sequence::{BlockKind, Message, NotePlacement, Participant},
        state::{PSEUDO_STATE, State, Transition},
    },
};

/// Render `diagram`, parse the text back and check it renders identically.
fn assert_stable(diagram: Diagram) -> String {
    let options = RenderOptions::default();
    let text = render(&diagram, &options);
    let reparsed = parse(&text);
    assert!(
        reparsed.is_ok(),
        "Rendered text should parse:\n{text}\n{:?}",
        reparsed.err()
    );
    let reparsed = reparsed.unwrap();
    assert_eq!(reparsed.tag(), diagram.tag());
    assert_eq!(render(&reparsed, &options), text);
    text
}

#[test]
fn test_built_flowchart_is_stable() {
    let chart = builder::flow(Direction::TopToBottom)
        .title("Deploy")
        .node(FlowNode::new("build").with_label("Build").with_shape(NodeShape::Round))
        .subgraph("prod", |sg| {
            sg.title("Production")
                .node(FlowNode::new("deploy").with_label("Deploy"))
                .link(FlowLink::new("build", "deploy").with_label("ok"))
        })
        .class_def("slow", ["stroke:#f00"])
        .class("deploy", "slow")
        .build(BuildOptions::default())
        .expect("Failed to build flowchart");

    let text = assert_stable(chart.into());
    assert!(text.contains("subgraph prod [Production]"), "{text}");
    assert!(text.contains("class deploy slow"), "{text}");
}

#[test]
fn test_built_class_diagram_is_stable() {
    let diagram = builder::class_diagram()
        .class(ClassNode::new("Animal").with_annotation("interface").with_member("+speak()"))
        .namespace("Farm", |ns| ns.class(ClassNode::new("Cow")))
        .relation(ClassRelation::inheritance("Animal", "Cow"))
        .note_for("Cow", "moo")
        .build(BuildOptions::default())
        .expect("Failed to build class diagram");

    let text = assert_stable(diagram.into());
    assert!(text.contains("namespace Farm {"), "{text}");
}

#[test]
fn test_built_sequence_is_stable() {
    let diagram = builder::sequence()
        .autonumber()
        .participant(Participant::new("A").with_label("Alice"))
        .participant(Participant::actor("B"))
        .message(Message::new("A", "B", "hello"))
        .block(BlockKind::Alt, "happy", |b| {
            b.message(Message::new("B", "A", "hi"))
                .section("grumpy")
                .note(NotePlacement::Over, ["A", "B"], "silence")
        })
        .build(BuildOptions::default())
        .expect("Failed to build sequence diagram");

    let text = assert_stable(diagram.into());
    assert!(text.contains("else grumpy"), "{text}");
}

#[test]
fn test_built_state_diagram_is_stable() {
    let diagram = builder::state()
        .state(State::new("Idle").with_description("idle"))
        .transition(Transition::new(PSEUDO_STATE, "Idle"))
        .composite("Busy", |c| {
            c.state(State::new("Work"))
                .transition(Transition::new(PSEUDO_STATE, "Work"))
        })
        .transition(Transition::new("Idle", "Busy").with_label("start"))
        .build(BuildOptions::default())
        .expect("Failed to build state diagram");

    assert_stable(diagram.into());
}

#[test]
fn test_validation_errors_lift_into_diagrammar_error() {
    let result = builder::sequence()
        .message(Message::new("A", "B", "hi"))
        .build(BuildOptions::default())
        .map_err(DiagrammarError::from);
    assert!(
        matches!(result, Err(DiagrammarError::SequenceValidation(_))),
        "Undeclared participants should fail validation"
    );
}

#[test]
fn test_unchecked_dangling_link_renders_and_reparses() {
    let chart = builder::flow(Direction::LeftToRight)
        .node(FlowNode::new("A"))
        .link(FlowLink::new("A", "B"))
        .build(BuildOptions::unchecked())
        .expect("Unchecked build should accept dangling endpoints");
    assert!(!chart.nodes.contains_key("B"));

    let options = RenderOptions::default();
    let text = render(&chart.into(), &options);
    let Diagram::Flowchart(reparsed) = parse(&text).expect("Rendered text should parse") else {
        panic!("Expected a flowchart");
    };
    // The link statement declares `B` when read back.
    assert!(reparsed.nodes.contains_key("B"));
    assert_stable(reparsed.into());
}
