use diagrammar_core::{Diagram, DialectTag};
use diagrammar_parser::{
    DetectError, ErrorCode, detect, init_engines, is_pie, is_sankey, parse, parse_as, parse_async,
    records::split_record,
};
use float_cmp::approx_eq;

#[test]
fn test_detects_every_dialect_from_its_header() {
    let cases = [
        ("flowchart TD\nA-->B", DialectTag::Flowchart),
        ("graph LR\nA-->B", DialectTag::Flowchart),
        ("classDiagram\nclass A", DialectTag::Class),
        ("sequenceDiagram\nA->>B: hi", DialectTag::Sequence),
        ("stateDiagram-v2\n[*] --> A", DialectTag::State),
        ("pie title Pets", DialectTag::Pie),
        ("erDiagram\nA ||--o{ B : has", DialectTag::Er),
        ("mindmap\n  root", DialectTag::Mindmap),
        ("quadrantChart\ntitle Q", DialectTag::Quadrant),
        ("sankey-beta\nA,B,1", DialectTag::Sankey),
        ("timeline\n2004 : x", DialectTag::Timeline),
        ("journey\ntitle J", DialectTag::Journey),
        ("xychart-beta\nbar [1]", DialectTag::XyChart),
    ];
    for (text, tag) in cases {
        assert_eq!(detect(text), Some(tag), "{text}");
    }
}

#[test]
fn test_detect_skips_front_matter_and_comments() {
    let text = "---\ntitle: Flows\n---\n\n%% a comment\nsankey-beta\nA,B,1\n";
    assert!(is_sankey(text));
    assert!(!is_pie(text));
    assert_eq!(detect("piechart"), None);
    assert_eq!(detect(""), None);
}

#[test]
fn test_parse_unknown_dialect() {
    assert!(matches!(
        parse("gantt\n  title x"),
        Err(DetectError::UnknownDialect)
    ));
}

#[test]
fn test_parse_reports_position() {
    let err = parse("flowchart LR\n    A --> B\n    ??\n").unwrap_err();
    let DetectError::Parse(err) = err else {
        panic!("expected a parse error");
    };
    assert_eq!((err.code, err.line, err.column), (ErrorCode::E100, 3, 5));
    assert_eq!(
        err.to_string(),
        "error[E100] at 3:5: unexpected statement `??`"
    );
}

#[test]
fn test_front_matter_title_reaches_metadata() {
    let diagram = parse("---\ntitle: \"Big flow\"\n---\nflowchart\n  A --> B\n").unwrap();
    assert_eq!(diagram.meta().title.as_deref(), Some("Big flow"));
}

#[test]
fn test_parse_as_accepts_headerless_body() {
    let Diagram::Sankey(diagram) = parse_as(DialectTag::Sankey, "A,B,3\nB,C,1.5\n").unwrap() else {
        panic!("expected a sankey diagram");
    };
    assert_eq!(diagram.nodes.len(), 3);
    assert_eq!(diagram.nodes["C"].label, "C");
}

#[test]
fn test_record_tokenizer() {
    assert_eq!(
        split_record(r#"  plain , "with, comma" , "say ""hi""" "#).unwrap(),
        vec!["plain", "with, comma", r#"say "hi""#]
    );
    assert_eq!(split_record("a,,b").unwrap(), vec!["a", "", "b"]);
    assert!(split_record(r#""open,b"#).is_err());
}

#[tokio::test]
async fn test_numeric_coercion() {
    let Diagram::Pie(chart) = parse_async("pie\n\"A\" : 100\n\"B\" : 33.33\n\"C\" : .5\n")
        .await
        .unwrap()
    else {
        panic!("expected a pie chart");
    };
    assert!(approx_eq!(f64, chart.sections["A"], 100.0, ulps = 2));
    assert!(approx_eq!(f64, chart.sections["B"], 33.33, ulps = 2));
    assert!(approx_eq!(f64, chart.sections["C"], 0.5, ulps = 2));
    assert!(approx_eq!(f64, chart.total(), 133.83, epsilon = 1e-9));
}

#[tokio::test]
async fn test_sync_pie_parse_after_init() {
    init_engines().await;
    let diagram = parse("pie showData\n\"A\" : 1\n").unwrap();
    assert_eq!(diagram.tag(), DialectTag::Pie);
}

#[tokio::test]
async fn test_pie_rejects_negative_values() {
    let err = parse_async("pie\n  \"A\" : -4\n").await.unwrap_err();
    let DetectError::Parse(err) = err else {
        panic!("expected a parse error");
    };
    assert_eq!((err.code, err.line, err.column), (ErrorCode::E202, 2, 9));
}

#[test]
fn test_dangling_references_are_kept() {
    let Diagram::Sequence(diagram) =
        parse("sequenceDiagram\nparticipant A\nA->>Ghost: boo\n").unwrap()
    else {
        panic!("expected a sequence diagram");
    };
    assert_eq!(diagram.participants.len(), 1);
    assert_eq!(diagram.messages()[0].target, "Ghost");
}
