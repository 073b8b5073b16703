use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CatalogError;

/// Opaque identifier of a catalog entry. Assigned once by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for EntryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Browsers,
    Utilities,
    Multimedia,
    Development,
    Security,
    Office,
    Games,
    System,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Browsers,
        Category::Utilities,
        Category::Multimedia,
        Category::Development,
        Category::Security,
        Category::Office,
        Category::Games,
        Category::System,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Browsers => "browsers",
            Category::Utilities => "utilities",
            Category::Multimedia => "multimedia",
            Category::Development => "development",
            Category::Security => "security",
            Category::Office => "office",
            Category::Games => "games",
            Category::System => "system",
            Category::Other => "other",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CatalogError::UnknownCategory(s.to_string()))
    }
}

/// Category query. `"all"` is reserved and never names a real category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(category) => category.as_str(),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SizeUnit {
    #[serde(rename = "KB")]
    Kb,
    #[default]
    #[serde(rename = "MB")]
    Mb,
    #[serde(rename = "GB")]
    Gb,
}

impl SizeUnit {
    pub const ALL: [SizeUnit; 3] = [SizeUnit::Kb, SizeUnit::Mb, SizeUnit::Gb];

    pub fn as_str(&self) -> &'static str {
        match self {
            SizeUnit::Kb => "KB",
            SizeUnit::Mb => "MB",
            SizeUnit::Gb => "GB",
        }
    }

    pub fn next(self) -> Self {
        match self {
            SizeUnit::Kb => SizeUnit::Mb,
            SizeUnit::Mb => SizeUnit::Gb,
            SizeUnit::Gb => SizeUnit::Kb,
        }
    }
}

impl fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizeUnit {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|u| u.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CatalogError::UnknownSizeUnit(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallMethod {
    #[default]
    Normal,
    Silent,
}

impl InstallMethod {
    pub fn is_silent(&self) -> bool {
        matches!(self, InstallMethod::Silent)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InstallMethod::Normal => "normal",
            InstallMethod::Silent => "silent",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            InstallMethod::Normal => InstallMethod::Silent,
            InstallMethod::Silent => InstallMethod::Normal,
        }
    }
}

impl fmt::Display for InstallMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstallMethod {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(InstallMethod::Normal),
            "silent" => Ok(InstallMethod::Silent),
            _ => Err(CatalogError::UnknownInstallMethod(s.to_string())),
        }
    }
}

/// A catalog record before the store has assigned it an id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftwareDraft {
    pub name: String,
    pub version: String,
    pub size: String,
    #[serde(default)]
    pub size_unit: SizeUnit,
    pub path: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub is_cracked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crack_instructions: Option<String>,
    #[serde(default)]
    pub install_method: InstallMethod,
}

impl SoftwareDraft {
    pub fn with_id(self, id: EntryId) -> SoftwareEntry {
        SoftwareEntry {
            id,
            name: self.name,
            version: self.version,
            size: self.size,
            size_unit: self.size_unit,
            path: self.path,
            description: self.description,
            category: self.category,
            is_cracked: self.is_cracked,
            crack_instructions: self.crack_instructions,
            install_method: self.install_method,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftwareEntry {
    pub id: EntryId,
    pub name: String,
    pub version: String,
    pub size: String,
    pub size_unit: SizeUnit,
    pub path: String,
    pub description: String,
    pub category: Category,
    pub is_cracked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crack_instructions: Option<String>,
    #[serde(default)]
    pub install_method: InstallMethod,
}

impl SoftwareEntry {
    pub fn size_label(&self) -> String {
        format!("{} {}", self.size, self.size_unit)
    }

    /// Flag notes, hidden unless the entry is flagged.
    pub fn visible_crack_instructions(&self) -> Option<&str> {
        if !self.is_cracked {
            return None;
        }
        self.crack_instructions
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }

    pub fn to_draft(&self) -> SoftwareDraft {
        SoftwareDraft {
            name: self.name.clone(),
            version: self.version.clone(),
            size: self.size.clone(),
            size_unit: self.size_unit,
            path: self.path.clone(),
            description: self.description.clone(),
            category: self.category,
            is_cracked: self.is_cracked,
            crack_instructions: self.crack_instructions.clone(),
            install_method: self.install_method,
        }
    }
}
