//! One extraction run: decode → extract → fold into graphs → merge artifacts → project.

use crate::app::dto::{GraphDocument, GraphSummary, Granularity, RunSummary};
use crate::app::projector::GraphProjector;
use crate::domain::artifact::{ArtifactAugmenter, ArtifactRecord};
use crate::domain::error::GraphError;
use crate::domain::extractor::{ExtractedReferences, ReferenceExtractor, ReferenceTuple};
use crate::domain::filter::NameFilter;
use crate::domain::graph::ReferenceGraph;
use crate::domain::ports::{ArtifactSource, ClassSource, DecodeFailure};
use anyhow::Result;
use std::collections::BTreeSet;
use tracing::{error, info, warn};

/// Union of the tuples of every decodable class.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub references: ExtractedReferences,
    pub decoded: usize,
    pub skipped: Vec<DecodeFailure>,
}

/// Decode and extract every class of a container. Classes that fail to decode
/// are logged and skipped; only a missing container is an error.
pub fn extract_all(source: &dyn ClassSource, extractor: &ReferenceExtractor) -> Result<Extraction> {
    let mut extraction = Extraction::default();
    for load in source.load()? {
        match load {
            Ok(class) => {
                extraction.references.merge(extractor.extract(&class));
                extraction.decoded += 1;
            }
            Err(failure) => {
                warn!(origin = %failure.origin, reason = %failure.reason, "skipping class");
                extraction.skipped.push(failure);
            }
        }
    }
    info!(
        decoded = extraction.decoded,
        skipped = extraction.skipped.len(),
        class_refs = extraction.references.class_refs.len(),
        method_refs = extraction.references.method_refs.len(),
        "extraction finished"
    );
    Ok(extraction)
}

/// Fold tuples into a fresh graph, then merge the artifacts into it.
pub fn build_graph(
    tuples: &BTreeSet<ReferenceTuple>,
    artifacts: &[ArtifactRecord],
) -> Result<ReferenceGraph, GraphError> {
    let mut graph = ReferenceGraph::from_references(tuples)?;
    ArtifactAugmenter::merge(&mut graph, artifacts)?;
    Ok(graph)
}

/// Outcome for one granularity. A failed graph does not affect the other one.
#[derive(Debug, Clone)]
pub struct GraphRun {
    pub granularity: Granularity,
    pub outcome: Result<GraphDocument, GraphError>,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub summary: RunSummary,
    pub skipped: Vec<DecodeFailure>,
    pub graphs: Vec<GraphRun>,
}

impl RunReport {
    pub fn document(&self, granularity: Granularity) -> Option<&Result<GraphDocument, GraphError>> {
        self.graphs
            .iter()
            .find(|g| g.granularity == granularity)
            .map(|g| &g.outcome)
    }

    /// True when every graph was built and projected.
    pub fn is_complete(&self) -> bool {
        self.graphs.iter().all(|g| g.outcome.is_ok())
    }
}

/// Pipeline wiring for one run.
pub struct Pipeline<'a> {
    classes: &'a dyn ClassSource,
    class_artifacts: &'a dyn ArtifactSource,
    method_artifacts: &'a dyn ArtifactSource,
    extractor: ReferenceExtractor,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        classes: &'a dyn ClassSource,
        class_artifacts: &'a dyn ArtifactSource,
        method_artifacts: &'a dyn ArtifactSource,
        filter: NameFilter,
    ) -> Self {
        Self {
            classes,
            class_artifacts,
            method_artifacts,
            extractor: ReferenceExtractor::new(filter),
        }
    }

    /// Run to completion. Missing inputs fail the whole run before anything is
    /// built; a `NodeNotFound` only fails the graph it happened in.
    pub fn run(&self) -> Result<RunReport> {
        let class_artifacts = self.class_artifacts.load()?;
        let method_artifacts = self.method_artifacts.load()?;

        info!(pattern = %self.extractor.filter().pattern(), "extracting references");
        let extraction = extract_all(self.classes, &self.extractor)?;

        let mut summary = RunSummary {
            classes_decoded: extraction.decoded,
            classes_skipped: extraction.skipped.len(),
            ..RunSummary::default()
        };

        let mut graphs = Vec::with_capacity(2);
        for (granularity, tuples, artifacts) in [
            (Granularity::Class, &extraction.references.class_refs, &class_artifacts),
            (Granularity::Method, &extraction.references.method_refs, &method_artifacts),
        ] {
            let outcome = project_graph(granularity, tuples, artifacts);
            let graph_summary = outcome.as_ref().ok().map(|(_, s)| s.clone());
            match granularity {
                Granularity::Class => summary.class_graph = graph_summary,
                Granularity::Method => summary.method_graph = graph_summary,
            }
            graphs.push(GraphRun {
                granularity,
                outcome: outcome.map(|(document, _)| document),
            });
        }

        Ok(RunReport {
            summary,
            skipped: extraction.skipped,
            graphs,
        })
    }
}

fn project_graph(
    granularity: Granularity,
    tuples: &BTreeSet<ReferenceTuple>,
    artifacts: &[ArtifactRecord],
) -> Result<(GraphDocument, GraphSummary), GraphError> {
    let graph = build_graph(tuples, artifacts).inspect_err(|e| {
        error!(graph = granularity.as_str(), error = %e, "graph build failed");
    })?;
    let document = GraphProjector::project(&graph);
    let summary = GraphSummary {
        tuples: tuples.len(),
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        reached: graph.reached_count(),
        artifacts: artifacts.len(),
        visual_nodes: document.nodes.len(),
        visual_edges: document.edges.len(),
    };
    info!(
        graph = granularity.as_str(),
        nodes = summary.nodes,
        edges = summary.edges,
        visual_nodes = summary.visual_nodes,
        "graph projected"
    );
    Ok((document, summary))
}
