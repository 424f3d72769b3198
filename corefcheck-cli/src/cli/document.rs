//! JSON annotation documents consumed by the CLI.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use corefcheck_core::{Relation, ensure_unique};
use serde::Deserialize;
use tracing::{Span, debug, field, instrument};

use super::commands::CliError;

/// Mention with the ordered token ids it covers.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct MentionRecord {
    /// Mention identifier.
    pub id: String,
    /// Token identifiers in document order.
    #[serde(default)]
    pub tokens: Vec<String>,
}

/// Claimed coreference cluster.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct ClusterRecord {
    /// Cluster identifier.
    pub id: String,
    /// Identifiers of the member mentions.
    #[serde(default)]
    pub mentions: Vec<String>,
}

/// Directed, labelled link between two mentions.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct RelationRecord {
    /// Origin mention.
    pub source: String,
    /// Destination mention.
    pub target: String,
    /// Relation type, such as `coref` or `before`.
    #[serde(default)]
    pub label: String,
}

/// Parsed annotation document. Every section may be omitted.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct Document {
    /// Known mentions.
    pub mentions: Vec<MentionRecord>,
    /// Clusters to validate.
    pub clusters: Vec<ClusterRecord>,
    /// Relations to close or group.
    pub relations: Vec<RelationRecord>,
}

/// Cluster identifier ordered by its position in the document.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct ClusterKey {
    position: usize,
    id: String,
}

impl fmt::Display for ClusterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

impl Document {
    /// Reads and parses the document at `path`.
    ///
    /// # Errors
    /// Returns [`CliError::Io`] when the file cannot be opened and
    /// [`CliError::Json`] when it is not a valid document.
    #[instrument(name = "cli.load_document", err, fields(path = field::Empty))]
    pub fn load(path: &Path) -> Result<Self, CliError> {
        Span::current().record("path", field::display(path.display()));
        let file = File::open(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document: Self =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(
            mentions = document.mentions.len(),
            clusters = document.clusters.len(),
            relations = document.relations.len(),
            "document loaded"
        );
        Ok(document)
    }

    /// Maps each mention id to its tokens.
    ///
    /// # Errors
    /// Returns [`CliError::Validation`] when a mention id repeats.
    pub fn spans(&self) -> Result<HashMap<String, Vec<String>>, CliError> {
        ensure_unique(self.mentions.iter().map(|mention| &mention.id))?;
        Ok(self
            .mentions
            .iter()
            .map(|mention| (mention.id.clone(), mention.tokens.clone()))
            .collect())
    }

    /// Collects cluster memberships keyed in document order.
    ///
    /// # Errors
    /// Returns [`CliError::Validation`] when a cluster id repeats.
    pub fn clusters(&self) -> Result<BTreeMap<ClusterKey, HashSet<String>>, CliError> {
        ensure_unique(self.clusters.iter().map(|cluster| &cluster.id))?;
        Ok(self
            .clusters
            .iter()
            .enumerate()
            .map(|(position, cluster)| {
                let key = ClusterKey {
                    position,
                    id: cluster.id.clone(),
                };
                (key, cluster.mentions.iter().cloned().collect())
            })
            .collect())
    }

    /// Returns the relations carrying `label`, or all of them when `label`
    /// is `None`.
    #[must_use]
    pub fn relations(&self, label: Option<&str>) -> Vec<Relation<String, String>> {
        self.relations
            .iter()
            .filter(|relation| label.is_none_or(|wanted| relation.label == wanted))
            .map(|relation| {
                Relation::new(
                    relation.source.clone(),
                    relation.target.clone(),
                    relation.label.clone(),
                )
            })
            .collect()
    }
}
