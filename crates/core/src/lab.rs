//! Lab catalog - the fixed list of labs a participant has to complete.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Errors raised while building a lab catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Catalog has no labs
    #[error("lab catalog is empty")]
    Empty,

    /// A lab has an empty name
    #[error("lab {0} has an empty name")]
    EmptyName(u32),

    /// Id outside `1..=len`
    #[error("lab id {id} is outside 1..={len}")]
    IdOutOfRange {
        /// Offending id
        id: u32,
        /// Catalog size
        len: usize,
    },

    /// Id used twice
    #[error("duplicate lab id {0}")]
    DuplicateId(u32),

    /// Catalog JSON could not be parsed
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// One unit of required coursework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabDefinition {
    /// Stable ordinal
    pub id: u32,

    /// Full lab title, matched against badge titles
    pub name: String,

    /// Display label
    pub short_name: String,
}

impl LabDefinition {
    /// Create a lab definition.
    pub fn new(id: u32, name: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            short_name: short_name.into(),
        }
    }
}

const STUDY_JAMS_LABS: [(&str, &str); 20] = [
    ("The Basics of Google Cloud Compute", "Cloud Compute"),
    ("Get Started with Cloud Storage", "Cloud Storage"),
    ("Get Started with Pub/Sub", "Pub/Sub"),
    ("Get Started with API Gateway", "API Gateway"),
    ("Get Started with Looker", "Looker"),
    ("Get Started with Dataplex", "Dataplex"),
    ("Get Started with Google Workspace Tools", "Workspace Tools"),
    ("App Building with AppSheet", "AppSheet"),
    ("Develop with Apps Script and AppSheet", "Apps Script"),
    ("Build a Website on Google Cloud", "Build Website"),
    ("Set Up a Google Cloud Network", "Cloud Network"),
    ("Store, Process, and Manage Data on Google Cloud - Console", "Manage Data"),
    ("Cloud Run Functions: 3 Ways", "Cloud Functions"),
    ("App Engine: 3 Ways", "App Engine"),
    ("Cloud Speech API: 3 Ways", "Speech API"),
    ("Monitoring in Google Cloud", "Monitoring"),
    ("Analyze Speech and Language with Google APIs", "Speech & Language"),
    ("Prompt Design in Vertex AI", "Vertex AI"),
    ("Develop Gen AI Apps with Gemini and Streamlit", "Gemini & Streamlit"),
    ("Level 3: Generative AI", "Level 3 Gen AI"),
];

/// Ordered, validated list of labs.
///
/// Lab names are lowercased once here so that matching badges does not
/// redo it for every profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabCatalog {
    labs: Vec<LabDefinition>,
    match_keys: Vec<String>,
}

impl LabCatalog {
    /// Validate and build a catalog.
    pub fn new(labs: Vec<LabDefinition>) -> Result<Self, CatalogError> {
        if labs.is_empty() {
            return Err(CatalogError::Empty);
        }

        let len = labs.len();
        let mut seen = HashSet::with_capacity(len);
        for lab in &labs {
            if lab.name.trim().is_empty() {
                return Err(CatalogError::EmptyName(lab.id));
            }
            if lab.id == 0 || lab.id as usize > len {
                return Err(CatalogError::IdOutOfRange { id: lab.id, len });
            }
            if !seen.insert(lab.id) {
                return Err(CatalogError::DuplicateId(lab.id));
            }
        }

        let match_keys = labs.iter().map(|lab| lab.name.to_lowercase()).collect();
        Ok(Self { labs, match_keys })
    }

    /// The Google Cloud Study Jams 2025 program.
    pub fn study_jams() -> Self {
        let labs = STUDY_JAMS_LABS
            .iter()
            .zip(1u32..)
            .map(|(&(name, short), id)| LabDefinition::new(id, name, short))
            .collect::<Vec<_>>();
        let match_keys = labs.iter().map(|lab| lab.name.to_lowercase()).collect();
        Self { labs, match_keys }
    }

    /// Load a catalog from a JSON array of lab definitions.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let labs: Vec<LabDefinition> = serde_json::from_str(json)?;
        Self::new(labs)
    }

    /// Labs in catalog order.
    pub fn labs(&self) -> &[LabDefinition] {
        &self.labs
    }

    /// Number of labs.
    pub fn len(&self) -> usize {
        self.labs.len()
    }

    /// Always false for a validated catalog.
    pub fn is_empty(&self) -> bool {
        self.labs.is_empty()
    }

    /// Look up a lab by id.
    pub fn get(&self, id: u32) -> Option<&LabDefinition> {
        self.labs.iter().find(|lab| lab.id == id)
    }

    /// Ids of labs completed by a set of badge titles.
    ///
    /// A lab counts as completed when any badge contains the lab's full
    /// name, ignoring case. Overlapping lab names can both match one badge.
    pub fn completed_by<S: AsRef<str>>(&self, badges: &[S]) -> Vec<u32> {
        let badges: Vec<String> = badges.iter().map(|b| b.as_ref().to_lowercase()).collect();

        self.labs
            .iter()
            .zip(&self.match_keys)
            .filter(|(_, key)| badges.iter().any(|badge| badge.contains(key.as_str())))
            .map(|(lab, _)| lab.id)
            .collect()
    }
}

impl Default for LabCatalog {
    fn default() -> Self {
        Self::study_jams()
    }
}

impl Serialize for LabCatalog {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.labs.serialize(serializer)
    }
}
