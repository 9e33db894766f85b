use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Versioned key for a tenet catalog (e.g., `principles_core_v1`).
///
/// Carried in listings and rendered output so consumers can tell which catalog
/// snapshot a set of entries came from.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogKey(pub String);

/// Stable slug identifying one principle entry (e.g., `srp`).
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub String);

/// Language tag attached to a code example.
///
/// Tags are purely descriptive; nothing in the catalog is executed. Known
/// variants keep serialization consistent; `Other` preserves forward
/// compatibility with catalogs that declare additional languages.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Ruby,
    Pseudocode,
    Other(String),
}

/// Compact entry listing used by `tenet-list --json`.
///
/// Snapshots denormalize the fields a reader needs to pick an entry without
/// shipping the full summary and example bodies.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct EntrySnapshot {
    pub id: EntryId,
    pub title: String,
    pub languages: Vec<Language>,
}

impl Serialize for Language {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Language {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_str(&value))
    }
}

impl Language {
    pub fn as_str(&self) -> &str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Ruby => "ruby",
            Language::Pseudocode => "pseudocode",
            Language::Other(value) => value.as_str(),
        }
    }

    fn from_str(value: &str) -> Self {
        match value {
            "python" => Language::Python,
            "javascript" => Language::JavaScript,
            "typescript" => Language::TypeScript,
            "ruby" => Language::Ruby,
            "pseudocode" => Language::Pseudocode,
            other => Language::Other(other.to_string()),
        }
    }
}
