//! Structured analysis events
//!
//! Core components never touch the global logger directly. They report what
//! happened to an [`EventSink`] handed in by the caller; the binary plugs in
//! [`LogSink`], tests collect events into a `Vec`.

use std::fmt;

/// Pipeline stages, in the only order they may run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Load,
    Partition,
    Adapt,
    Classify,
    Report,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Load => "Graph JSON to Graph object",
            Self::Partition => "Cluster identification",
            Self::Adapt => "Cluster construction",
            Self::Classify => "Inter-cluster edges identification",
            Self::Report => "Analysis report",
        };
        write!(f, "{}", s)
    }
}

/// Something worth telling the operator about
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisEvent {
    StageStarted(Stage),
    StageFinished(Stage),

    /// Lookup of a node by name failed
    NodeNotFound { name: String },

    /// Inter-cluster classification could not place a node in any cluster
    ClusterNotFound { node: String },

    /// An edge from the input was dropped while building the graph
    EdgeSkipped {
        source: String,
        destination: String,
        reason: String,
    },

    /// Input could not be loaded and was replaced by an empty graph
    InputRejected { path: String, reason: String },

    /// Modularity of the partition handed to the adapter
    Modularity { algorithm: String, value: f64 },

    /// Modularity of the whole node set as a single community
    BaseModularity(f64),

    LevelModularity { level: usize, value: f64 },
    LevelSelected { level: usize },
    NoImprovingLevel,

    /// intra + inter edge count does not match the graph's edge count
    EdgeCountMismatch { classified: usize, total: usize },

    /// One rendered line of the statistics report
    ReportLine(String),
}

impl fmt::Display for AnalysisEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StageStarted(stage) => write!(f, "BEGIN: {}", stage),
            Self::StageFinished(stage) => write!(f, "END: {}", stage),
            Self::NodeNotFound { name } => write!(f, "Node with name {} was not found", name),
            Self::ClusterNotFound { node } => write!(f, "Cluster of node {} not found", node),
            Self::EdgeSkipped { source, destination, reason } => {
                write!(f, "Skipping edge {} -> {}: {}", source, destination, reason)
            }
            Self::InputRejected { path, reason } => {
                write!(f, "Could not load graph from {}: {}", path, reason)
            }
            Self::Modularity { algorithm, value } => {
                write!(f, "Modularity of the {} clusters is: {}", algorithm, value)
            }
            Self::BaseModularity(value) => write!(f, "Base modularity: {}", value),
            Self::LevelModularity { level, value } => {
                write!(f, "Modularity score at level {} is {}", level, value)
            }
            Self::LevelSelected { level } => {
                write!(f, "Optimal level of depth in the Girvan-Newman hierarchy was level {}", level)
            }
            Self::NoImprovingLevel => write!(f, "No optimal level found; using the last level"),
            Self::EdgeCountMismatch { classified, total } => write!(
                f,
                "Intra + inter-cluster edges ({}) differ from the graph's edge count ({})",
                classified, total
            ),
            Self::ReportLine(line) => write!(f, "{}", line),
        }
    }
}

impl AnalysisEvent {
    /// Whether the event signals degraded precision
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::NodeNotFound { .. }
                | Self::ClusterNotFound { .. }
                | Self::EdgeSkipped { .. }
                | Self::NoImprovingLevel
                | Self::EdgeCountMismatch { .. }
        )
    }
}

/// Receiver for analysis events
pub trait EventSink {
    fn emit(&mut self, event: AnalysisEvent);
}

/// Forwards events to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&mut self, event: AnalysisEvent) {
        match &event {
            AnalysisEvent::InputRejected { .. } => log::error!("{}", event),
            AnalysisEvent::LevelModularity { .. } => log::debug!("{}", event),
            e if e.is_warning() => log::warn!("{}", event),
            _ => log::info!("{}", event),
        }
    }
}

impl EventSink for Vec<AnalysisEvent> {
    fn emit(&mut self, event: AnalysisEvent) {
        self.push(event);
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: AnalysisEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_sink_records_in_order() {
        let mut events: Vec<AnalysisEvent> = Vec::new();
        events.emit(AnalysisEvent::StageStarted(Stage::Load));
        events.emit(AnalysisEvent::StageFinished(Stage::Load));

        assert_eq!(
            events,
            vec![
                AnalysisEvent::StageStarted(Stage::Load),
                AnalysisEvent::StageFinished(Stage::Load),
            ]
        );
    }

    #[test]
    fn lookup_misses_are_warnings() {
        assert!(AnalysisEvent::ClusterNotFound { node: "A".into() }.is_warning());
        assert!(AnalysisEvent::NodeNotFound { name: "A".into() }.is_warning());
        assert!(!AnalysisEvent::StageStarted(Stage::Report).is_warning());
    }

    #[test]
    fn stage_messages_mark_begin_and_end() {
        let begin = AnalysisEvent::StageStarted(Stage::Classify).to_string();
        assert_eq!(begin, "BEGIN: Inter-cluster edges identification");
    }
}
