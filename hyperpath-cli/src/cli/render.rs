//! Plain-text rendering of [`ExecutionSummary`] values.

use std::{
    collections::HashSet,
    io::{self, Write},
};

use hyperpath_core::{
    ComponentSummary, DecisionPatterns, FeedbackReport, HubAnalysis, HyperPath, Hypergraph,
    HypergraphStatistics, PowerLawFit, TOP_CO_OCCURRENCES,
};

use super::commands::{ExecutionSummary, Report};

const PARTICIPANTS_SHOWN: usize = 3;

/// Renders `summary` to `writer` in a human-readable text format.
///
/// Path reports walk each step and print its kind and relation, its
/// rationale when present, and the entities it shares with the next step.
/// Context and sources carried by the visited hyperedges are listed once per
/// report, first mention first.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "data source: {}", summary.data_source)?;
    let graph = summary.snapshot.as_ref();
    match &summary.report {
        Report::Stats {
            statistics,
            distribution,
            fit,
        } => {
            render_statistics(statistics.as_ref(), &mut writer)?;
            writeln!(writer, "degree distribution:")?;
            for (degree, count) in distribution {
                writeln!(writer, "  {degree}\t{count}")?;
            }
            render_fit(fit.as_ref(), &mut writer)
        }
        Report::Neighbours {
            position,
            s,
            neighbours,
        } => {
            writeln!(
                writer,
                "neighbours of {} (s={s}): {}",
                id_at(graph, *position),
                neighbours.len()
            )?;
            for &neighbour in neighbours {
                writeln!(writer, "  {}", id_at(graph, neighbour))?;
            }
            Ok(())
        }
        Report::Paths { from, to, paths } => {
            writeln!(writer, "paths from {from} to {to}: {}", paths.len())?;
            for (rank, path) in paths.iter().enumerate() {
                render_path(graph, rank + 1, path, &mut writer)?;
            }
            render_path_context(graph, paths, &mut writer)
        }
        Report::Components { summary, isolated } => {
            render_components(summary, &mut writer)?;
            writeln!(writer, "isolated hyperedges: {}", isolated.len())?;
            for &position in isolated {
                writeln!(writer, "  {}", id_at(graph, position))?;
            }
            Ok(())
        }
        Report::Hubs {
            analysis,
            rich_club,
        } => {
            render_hubs(analysis, &mut writer)?;
            writeln!(writer, "rich club:")?;
            for (threshold, coefficient) in rich_club {
                writeln!(writer, "  >={threshold}\t{coefficient:.3}")?;
            }
            Ok(())
        }
        Report::Patterns { patterns, feedback } => {
            render_patterns(graph, patterns, &mut writer)?;
            render_feedback(graph, feedback, &mut writer)
        }
    }
}

fn id_at(graph: &Hypergraph, position: usize) -> &str {
    graph.get(position).map_or("<unknown>", |hyperedge| hyperedge.id())
}

fn render_statistics(
    statistics: Option<&HypergraphStatistics>,
    writer: &mut impl Write,
) -> io::Result<()> {
    let Some(stats) = statistics else {
        return writeln!(writer, "hyperedges: 0");
    };
    writeln!(writer, "hyperedges: {}", stats.hyperedge_count)?;
    writeln!(writer, "entities: {}", stats.entity_count)?;
    writeln!(
        writer,
        "hyperedge size: mean {:.2} (min {}, max {})",
        stats.mean_hyperedge_size, stats.min_hyperedge_size, stats.max_hyperedge_size
    )?;
    writeln!(
        writer,
        "entity degree: mean {:.2} (max {})",
        stats.mean_entity_degree, stats.max_entity_degree
    )?;
    writeln!(
        writer,
        "overlapping pairs: >=1 {}, >=2 {}, >=3 {}",
        stats.pairs_sharing_one, stats.pairs_sharing_two, stats.pairs_sharing_three
    )
}

fn render_fit(fit: Option<&PowerLawFit>, writer: &mut impl Write) -> io::Result<()> {
    match fit {
        Some(fit) => writeln!(
            writer,
            "power law: exponent {:.3}, r^2 {:.3}",
            fit.exponent, fit.r_squared
        ),
        None => writeln!(writer, "power law: fewer than two degree classes"),
    }
}

fn render_path(
    graph: &Hypergraph,
    rank: usize,
    path: &HyperPath,
    writer: &mut impl Write,
) -> io::Result<()> {
    let route: Vec<&str> = path.ids(graph).collect();
    writeln!(
        writer,
        "path {rank} ({} hyperedges, s={}): {}",
        path.len(),
        path.s(),
        route.join(" -> ")
    )?;
    let hyperedges: Vec<_> = path.hyperedges(graph).collect();
    for (step, hyperedge) in hyperedges.iter().enumerate() {
        let metadata = hyperedge.metadata();
        writeln!(
            writer,
            "  step {}: {} [{} - {}]",
            step + 1,
            hyperedge.id(),
            metadata.kind.as_deref().unwrap_or("-"),
            metadata.relation.as_deref().unwrap_or("-"),
        )?;
        if let Some(rationale) = &metadata.rationale {
            writeln!(writer, "    rationale: {rationale}")?;
        }
        let involving: Vec<&str> = hyperedge.entities().take(PARTICIPANTS_SHOWN).collect();
        writeln!(writer, "    involving: {}", involving.join(", "))?;
        if let Some(next) = hyperedges.get(step + 1) {
            let shared: Vec<&str> = hyperedge.shared_entities(next).collect();
            writeln!(writer, "    connected via: {}", shared.join(", "))?;
        }
    }
    Ok(())
}

fn render_path_context(
    graph: &Hypergraph,
    paths: &[HyperPath],
    writer: &mut impl Write,
) -> io::Result<()> {
    let mut seen_context: HashSet<&str> = HashSet::new();
    let mut context: Vec<(&str, &str)> = Vec::new();
    let mut seen_sources: HashSet<&str> = HashSet::new();
    let mut sources: Vec<&str> = Vec::new();
    for hyperedge in paths.iter().flat_map(|path| path.hyperedges(graph)) {
        let metadata = hyperedge.metadata();
        for item in &metadata.context {
            if seen_context.insert(item.as_str()) {
                context.push((item.as_str(), hyperedge.id()));
            }
        }
        for source in &metadata.provenance {
            if seen_sources.insert(source.as_str()) {
                sources.push(source.as_str());
            }
        }
    }
    if !context.is_empty() {
        writeln!(writer, "context:")?;
        for (item, origin) in context {
            writeln!(writer, "  {item} (from {origin})")?;
        }
    }
    if !sources.is_empty() {
        writeln!(writer, "sources: {}", sources.join(", "))?;
    }
    Ok(())
}

fn render_patterns(
    graph: &Hypergraph,
    patterns: &DecisionPatterns,
    writer: &mut impl Write,
) -> io::Result<()> {
    writeln!(writer, "decision kinds:")?;
    for (kind, count) in &patterns.kind_distribution {
        writeln!(writer, "  {kind}\t{count}")?;
    }
    writeln!(writer, "participant patterns:")?;
    for pattern in &patterns.participant_patterns {
        let entities: Vec<&str> = pattern.entities.iter().map(|entity| &**entity).collect();
        writeln!(writer, "  {}\t{}", entities.join(", "), pattern.count)?;
    }
    writeln!(writer, "anomalies: {}", patterns.anomalies.len())?;
    for anomaly in &patterns.anomalies {
        writeln!(
            writer,
            "  {}: {} appears in no other hyperedge",
            id_at(graph, anomaly.position),
            anomaly.entity
        )?;
    }
    Ok(())
}

fn render_feedback(
    graph: &Hypergraph,
    feedback: &FeedbackReport,
    writer: &mut impl Write,
) -> io::Result<()> {
    writeln!(writer, "isolated hyperedges: {}", feedback.isolated.len())?;
    for &position in &feedback.isolated {
        writeln!(writer, "  {}", id_at(graph, position))?;
    }
    writeln!(
        writer,
        "resolution candidates: {}",
        feedback.resolution_candidates.len()
    )?;
    for candidate in &feedback.resolution_candidates {
        writeln!(
            writer,
            "  {}\tdegree {}\tneighbours {}",
            candidate.entity, candidate.degree, candidate.unique_neighbours
        )?;
    }
    if let Some(components) = feedback.connectivity_gap {
        writeln!(writer, "connectivity gap: {components} components at s=1")?;
    }
    if let Some(coverage) = feedback.weak_overlap {
        writeln!(writer, "weak overlap: largest s=2 component covers {coverage:.3}")?;
    }
    Ok(())
}

fn render_components(summary: &ComponentSummary, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer, "components (s={}): {}", summary.s, summary.component_count)?;
    writeln!(writer, "largest component: {}", summary.largest_component_size)?;
    let sizes: Vec<String> = summary.top_sizes.iter().map(ToString::to_string).collect();
    writeln!(writer, "top sizes: {}", sizes.join(", "))
}

fn render_hubs(analysis: &HubAnalysis, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer, "hubs: {}", analysis.hubs.len())?;
    for hub in &analysis.hubs {
        writeln!(
            writer,
            "{}\tdegree {}\tneighbours {}\tdensity {:.3}\tmean size {:.2}\tintegration {}",
            hub.entity,
            hub.degree,
            hub.unique_neighbours(),
            hub.ego_density,
            hub.mean_hyperedge_size,
            hub.integration_score
        )?;
        let partners: Vec<String> = hub
            .top_co_occurring(TOP_CO_OCCURRENCES)
            .iter()
            .map(|partner| format!("{} ({})", partner.entity, partner.count))
            .collect();
        writeln!(writer, "  co-occurs with: {}", partners.join(", "))?;
    }
    Ok(())
}
