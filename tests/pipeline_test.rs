//! Pipeline tests: decoded classes in, projected documents out.

mod common;

use calltrack::app::dto::{GraphDocument, Granularity, Shape};
use calltrack::app::pipeline::{Pipeline, RunReport};
use calltrack::domain::artifact::{ArtifactKind, ArtifactRecord};
use calltrack::domain::filter::NameFilter;
use calltrack::domain::node::NodeKind;
use calltrack::domain::ports::NoArtifacts;
use common::fixtures::{class, method, with_methods};
use common::mock::{MockArtifactSource, MockClassSource};

fn abc_source() -> MockClassSource {
    MockClassSource::new()
        .with_class(class("com.acme.A", &["com.acme.B", "java.lang.Object"]))
        .with_class(class("com.acme.B", &["java.lang.Object"]))
        .with_class(class("com.acme.C", &["java.lang.Object"]))
}

fn run_with(
    classes: &MockClassSource,
    class_artifacts: &MockArtifactSource,
    method_artifacts: &MockArtifactSource,
) -> RunReport {
    Pipeline::new(
        classes,
        class_artifacts,
        method_artifacts,
        NameFilter::new("com.acme"),
    )
    .run()
    .unwrap()
}

fn ok_document(report: &RunReport, granularity: Granularity) -> &GraphDocument {
    report.document(granularity).unwrap().as_ref().unwrap()
}

/// `(source label, target label)` of every edge.
fn edge_labels(doc: &GraphDocument) -> Vec<(String, String)> {
    doc.edges
        .iter()
        .map(|e| {
            (
                doc.node(&e.source_id).unwrap().label.clone(),
                doc.node(&e.target_id).unwrap().label.clone(),
            )
        })
        .collect()
}

#[test]
fn test_class_graph_keeps_used_and_using_classes() {
    let none = MockArtifactSource::default();
    let report = run_with(&abc_source(), &none, &none);
    let doc = ok_document(&report, Granularity::Class);

    let labels: Vec<_> = doc.nodes.iter().map(|n| n.label.as_str()).collect();
    assert_eq!(labels, vec!["A", "B"]);
    assert_eq!(edge_labels(doc), vec![("B".into(), "A".into())]);
    assert!(report.is_complete());
}

#[test]
fn test_pattern_excludes_foreign_types() {
    let none = MockArtifactSource::default();
    let report = run_with(&abc_source(), &none, &none);
    let doc = ok_document(&report, Granularity::Class);
    assert!(doc.node_by_label("Object").is_none());

    let summary = report.summary.class_graph.as_ref().unwrap();
    assert_eq!(summary.tuples, 1);
    assert_eq!(summary.nodes, 2);
    assert_eq!(summary.edges, 1);
}

#[test]
fn test_use_case_linked_to_existing_class() {
    let artifacts = MockArtifactSource::new(vec![ArtifactRecord::new(
        "UC1",
        "Checkout",
        ArtifactKind::UseCase,
        vec!["com.acme.B".into()],
    )]);
    let none = MockArtifactSource::default();
    let report = run_with(&abc_source(), &artifacts, &none);
    let doc = ok_document(&report, Granularity::Class);

    let uc = doc.node_by_label("Checkout").unwrap();
    assert_eq!(uc.kind, NodeKind::UseCase);
    assert_eq!(uc.shape, Shape::Rectangle);
    assert!(edge_labels(doc).contains(&("B".into(), "Checkout".into())));
    assert_eq!(report.summary.class_graph.as_ref().unwrap().artifacts, 1);
}

#[test]
fn test_unknown_link_fails_only_its_graph() {
    let artifacts = MockArtifactSource::new(vec![ArtifactRecord::new(
        "UC2",
        "Refund",
        ArtifactKind::UseCase,
        vec!["com.acme.Z".into()],
    )]);
    let none = MockArtifactSource::default();
    let report = run_with(&abc_source(), &artifacts, &none);

    let err = report.document(Granularity::Class).unwrap().as_ref().unwrap_err();
    assert!(err.is_node_not_found());
    assert_eq!(err.node_id(), "com.acme.Z");
    assert!(report.summary.class_graph.is_none());

    assert!(report.document(Granularity::Method).unwrap().is_ok());
    assert!(!report.is_complete());
}

#[test]
fn test_method_graph_follows_invocations() {
    let classes = MockClassSource::new()
        .with_class(with_methods(
            class("com.acme.Shop", &["com.acme.Cart"]),
            vec![
                method("<init>", &[("java.lang.Object", "<init>")]),
                method("checkout", &[("com.acme.Cart", "total"), ("com.acme.Cart", "<init>")]),
            ],
        ))
        .with_class(with_methods(
            class("com.acme.Cart", &[]),
            vec![method("total", &[("java.lang.Math", "max")])],
        ));
    let none = MockArtifactSource::default();
    let report = run_with(&classes, &none, &none);
    let doc = ok_document(&report, Granularity::Method);

    assert_eq!(
        edge_labels(doc),
        vec![("Cart:total".into(), "Shop:checkout".into())]
    );
    assert_eq!(report.summary.method_graph.as_ref().unwrap().tuples, 1);
}

#[test]
fn test_method_artifacts_are_independent_of_class_artifacts() {
    let classes = MockClassSource::new().with_class(with_methods(
        class("com.acme.Shop", &[]),
        vec![method("checkout", &[("com.acme.Cart", "total")])],
    ));
    let method_artifacts = MockArtifactSource::new(vec![ArtifactRecord::new(
        "TC7",
        "Totals add up",
        ArtifactKind::TestCase,
        vec!["com.acme.Cart:total".into()],
    )]);
    let none = MockArtifactSource::default();
    let report = run_with(&classes, &none, &method_artifacts);
    let doc = ok_document(&report, Granularity::Method);

    let tc = doc.node_by_label("Totals add up").unwrap();
    assert_eq!(tc.shape, Shape::Triangle);
    assert!(edge_labels(doc).contains(&("Cart:total".into(), "Totals add up".into())));
    assert!(report.document(Granularity::Class).unwrap().is_ok());
}

#[test]
fn test_decode_failures_are_skipped() {
    let classes = abc_source().with_failure("broken/D.class", "truncated class file at byte 10");
    let none = MockArtifactSource::default();
    let report = run_with(&classes, &none, &none);

    assert_eq!(report.summary.classes_decoded, 3);
    assert_eq!(report.summary.classes_skipped, 1);
    assert_eq!(report.skipped[0].origin, "broken/D.class");
    assert!(report.is_complete());
}

#[test]
fn test_missing_class_container_fails_the_run() {
    let none = MockArtifactSource::default();
    let result = Pipeline::new(
        &MockClassSource::missing(),
        &none,
        &none,
        NameFilter::new("com.acme"),
    )
    .run();
    assert!(result.is_err());
}

#[test]
fn test_missing_artifact_file_fails_the_run() {
    let result = Pipeline::new(
        &abc_source(),
        &MockArtifactSource::missing(),
        &NoArtifacts,
        NameFilter::new("com.acme"),
    )
    .run();
    let err = result.unwrap_err();
    assert!(err.to_string().contains("artifact"));
}

#[test]
fn test_class_order_does_not_change_documents() {
    let reversed = MockClassSource::new()
        .with_class(class("com.acme.C", &["java.lang.Object"]))
        .with_class(class("com.acme.B", &["java.lang.Object"]))
        .with_class(class("com.acme.A", &["com.acme.B", "java.lang.Object"]));
    let none = MockArtifactSource::default();

    let forward = run_with(&abc_source(), &none, &none);
    let backward = run_with(&reversed, &none, &none);
    assert_eq!(
        ok_document(&forward, Granularity::Class),
        ok_document(&backward, Granularity::Class)
    );
}
