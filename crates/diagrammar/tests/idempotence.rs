//! Rendering is a fixed point for generated diagrams, under every option set.

use std::collections::BTreeMap;

use proptest::prelude::*;

use diagrammar::{
    BuildOptions, Diagram, DiagrammarError, ErrorCode, Indent, RenderOptions,
    builder::{self, FlowValidationError},
    parse, render,
    structure::{
        Direction,
        flowchart::{FlowLink, FlowNode, NodeShape, RESERVED_IDS, is_reserved_id},
        sankey::SankeyDiagram,
    },
};

/// Generated nodes: id to optional label, shape and whether it carries the `hot` class.
type Nodes = BTreeMap<String, (Option<String>, NodeShape, bool)>;
type Links = Vec<(prop::sample::Index, prop::sample::Index)>;

// ===================
// Strategies
// ===================

/// Plain ids, statement keywords, and words that look like keywords but are not.
fn node_id_strategy() -> impl Strategy<Value = String> {
    let mut words: Vec<String> = RESERVED_IDS.iter().map(|w| w.to_string()).collect();
    words.extend(["graph", "flowchart", "click", "End", "ending", "default"].map(String::from));
    prop_oneof![
        3 => "[a-z][a-z0-9]{1,6}",
        1 => prop::sample::select(words),
    ]
}

fn label_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9]([A-Za-z0-9 ]{0,10}[A-Za-z0-9])?"
}

fn shape_strategy() -> impl Strategy<Value = NodeShape> {
    prop::sample::select(NodeShape::ALL.to_vec())
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop::sample::select(vec![
        Direction::TopToBottom,
        Direction::BottomToTop,
        Direction::LeftToRight,
        Direction::RightToLeft,
    ])
}

fn indent_strategy() -> impl Strategy<Value = Indent> {
    prop_oneof![
        (1usize..5).prop_map(Indent::spaces),
        (1usize..3).prop_map(|n| Indent::new("\t".repeat(n)).expect("tabs are a valid indent")),
    ]
}

fn options_strategy() -> impl Strategy<Value = RenderOptions> {
    (indent_strategy(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(indent, inline_classes, compact_links, sort_entities)| {
            RenderOptions::new(indent, inline_classes, compact_links, sort_entities)
        },
    )
}

fn flowchart_parts_strategy() -> impl Strategy<Value = (Direction, Nodes, Links)> {
    (
        direction_strategy(),
        prop::collection::btree_map(
            node_id_strategy(),
            (prop::option::of(label_strategy()), shape_strategy(), any::<bool>()),
            1..6,
        ),
        prop::collection::vec((any::<prop::sample::Index>(), any::<prop::sample::Index>()), 0..6),
    )
}

fn sankey_strategy() -> impl Strategy<Value = Diagram> {
    let field = "[A-Za-z]([A-Za-z ,\"]{0,10}[A-Za-z])?";
    prop::collection::vec((field, field, 0.0..1.0e6f64), 1..8).prop_map(|flows| {
        let mut diagram = SankeyDiagram::default();
        for (source, target, value) in flows {
            diagram.add_flow(&source, &target, value);
        }
        diagram.into()
    })
}

// ===================
// Property Test Functions
// ===================

/// Parsing rendered text and rendering it again reproduces the text.
fn check_render_is_fixed_point(
    diagram: &Diagram,
    options: &RenderOptions,
) -> Result<(), TestCaseError> {
    let text = render(diagram, options);
    let reparsed = parse(&text);

    let err = reparsed.as_ref().err();
    prop_assert!(err.is_none(), "Rendered text failed to parse:\n{text}\n{err:?}");
    if let Ok(reparsed) = reparsed {
        prop_assert_eq!(render(&reparsed, options), text);
    }
    Ok(())
}

/// A flowchart with a keyword id is refused by both the builder and the
/// parser; every other flowchart renders to a fixed point.
fn check_flowchart(
    (direction, nodes, links): (Direction, Nodes, Links),
    options: &RenderOptions,
) -> Result<(), TestCaseError> {
    let ids: Vec<String> = nodes.keys().cloned().collect();
    let reserved = ids.iter().find(|id| is_reserved_id(id)).cloned();

    let mut flow = builder::flow(direction).class_def("hot", ["fill:#f00"]);
    for (id, (label, shape, hot)) in nodes {
        let mut node = match label {
            Some(label) => FlowNode::new(id).with_label(label).with_shape(shape),
            None => FlowNode::new(id),
        };
        if hot {
            node = node.with_class("hot");
        }
        flow = flow.node(node);
    }
    for (source, target) in links {
        flow = flow.link(FlowLink::new(source.get(&ids), target.get(&ids)));
    }

    let built = flow.build(BuildOptions::default());
    match reserved {
        Some(id) => {
            prop_assert_eq!(built.err(), Some(FlowValidationError::ReservedId { id: id.clone() }));

            // The same id written as text is refused by the parser.
            let text = format!("flowchart LR\n{id} --> x\n");
            let code = match parse(&text) {
                Err(DiagrammarError::Parse { err, .. }) => Some(err.code),
                _ => None,
            };
            prop_assert_eq!(code, Some(ErrorCode::E103), "{}", text);
        }
        None => {
            let chart = built.map_err(|err| TestCaseError::fail(err.to_string()))?;
            check_render_is_fixed_point(&chart.into(), options)?;
        }
    }
    Ok(())
}

// ===================
// Proptest Wrappers
// ===================

proptest! {
    #[test]
    fn flowcharts_render_to_a_fixed_point(
        parts in flowchart_parts_strategy(),
        options in options_strategy(),
    ) {
        check_flowchart(parts, &options)?;
    }

    #[test]
    fn sankey_diagrams_render_to_a_fixed_point(
        diagram in sankey_strategy(),
        options in options_strategy(),
    ) {
        check_render_is_fixed_point(&diagram, &options)?;
    }
}
