use super::severity::Severity;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

const BUILTIN_CATALOG: &str = include_str!("catalog.toml");

/// Raw catalog file contents, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogDefinition {
    #[serde(rename = "category", default)]
    pub categories: Vec<CategoryDefinition>,
    /// Outcome pools keyed by severity label.
    #[serde(default)]
    pub outcomes: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryDefinition {
    pub name: String,
    #[serde(default)]
    pub events: Vec<EventDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventDefinition {
    pub name: String,
    pub severity: String,
}

/// Defect found while loading a catalog definition.
#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    EmptyCatalog,
    DuplicateCategory(String),
    EmptyCategory(String),
    DuplicateEvent { category: String, event: String },
    UnknownSeverity { context: String, label: String },
    MissingOutcomePool { category: String, event: String, severity: Severity },
    EmptyOutcomePool(Severity),
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(err) => write!(f, "catalog io error: {err}"),
            CatalogError::Parse(err) => write!(f, "catalog parse error: {err}"),
            CatalogError::EmptyCatalog => write!(f, "catalog defines no categories"),
            CatalogError::DuplicateCategory(name) => write!(f, "duplicate category: {name}"),
            CatalogError::EmptyCategory(name) => write!(f, "category {name} has no events"),
            CatalogError::DuplicateEvent { category, event } => {
                write!(f, "duplicate event {event} in category {category}")
            }
            CatalogError::UnknownSeverity { context, label } => {
                write!(f, "unknown severity {label:?} ({context})")
            }
            CatalogError::MissingOutcomePool {
                category,
                event,
                severity,
            } => write!(
                f,
                "event {event} in category {category} references severity {severity} with no outcome pool"
            ),
            CatalogError::EmptyOutcomePool(severity) => {
                write!(f, "outcome pool for {severity} is empty")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::Io(err)
    }
}

impl From<toml::de::Error> for CatalogError {
    fn from(err: toml::de::Error) -> Self {
        CatalogError::Parse(err)
    }
}

/// Lookup key absent from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFound {
    Category(String),
    Severity(String),
}

impl NotFound {
    /// Client-facing message for the missing key's domain.
    pub fn message(&self) -> &'static str {
        match self {
            NotFound::Category(_) => "Category not found",
            NotFound::Severity(_) => "Severity not found",
        }
    }

    pub fn key(&self) -> &str {
        match self {
            NotFound::Category(key) | NotFound::Severity(key) => key,
        }
    }
}

impl std::fmt::Display for NotFound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {:?}", self.message(), self.key())
    }
}

impl std::error::Error for NotFound {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEvent {
    pub name: String,
    pub severity: Severity,
}

/// Category name to event name to severity, sorted for stable output.
pub type CategoryListing = BTreeMap<String, BTreeMap<String, Severity>>;

/// One random event together with the outcome drawn from its severity pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDraw {
    pub event: String,
    pub severity: Severity,
    pub outcome: String,
}

/// Immutable category and outcome tables with uniform random selection.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: BTreeMap<String, Vec<CatalogEvent>>,
    outcomes: BTreeMap<Severity, Vec<String>>,
}

impl Catalog {
    /// Loads the catalog embedded in the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, CatalogError> {
        let definition: CatalogDefinition = toml::from_str(contents)?;
        Self::from_definition(definition)
    }

    /// Validates referential integrity and freezes the definition.
    pub fn from_definition(definition: CatalogDefinition) -> Result<Self, CatalogError> {
        let mut outcomes = BTreeMap::new();
        for (label, pool) in definition.outcomes {
            let severity =
                Severity::parse(&label).ok_or_else(|| CatalogError::UnknownSeverity {
                    context: "outcome pool".to_string(),
                    label: label.clone(),
                })?;
            if pool.is_empty() {
                return Err(CatalogError::EmptyOutcomePool(severity));
            }
            outcomes.insert(severity, pool);
        }

        if definition.categories.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }

        let mut categories = BTreeMap::new();
        for category in definition.categories {
            if categories.contains_key(&category.name) {
                return Err(CatalogError::DuplicateCategory(category.name));
            }
            if category.events.is_empty() {
                return Err(CatalogError::EmptyCategory(category.name));
            }

            let mut seen = HashSet::new();
            let mut events = Vec::with_capacity(category.events.len());
            for event in category.events {
                if !seen.insert(event.name.clone()) {
                    return Err(CatalogError::DuplicateEvent {
                        category: category.name,
                        event: event.name,
                    });
                }
                let Some(severity) = Severity::parse(&event.severity) else {
                    return Err(CatalogError::UnknownSeverity {
                        context: format!("event {} in category {}", event.name, category.name),
                        label: event.severity,
                    });
                };
                if !outcomes.contains_key(&severity) {
                    return Err(CatalogError::MissingOutcomePool {
                        category: category.name,
                        event: event.name,
                        severity,
                    });
                }
                events.push(CatalogEvent {
                    name: event.name,
                    severity,
                });
            }
            categories.insert(category.name, events);
        }

        Ok(Self {
            categories,
            outcomes,
        })
    }

    /// Full category/event/severity mapping.
    pub fn list_categories(&self) -> CategoryListing {
        self.categories
            .iter()
            .map(|(name, events)| {
                let events = events
                    .iter()
                    .map(|event| (event.name.clone(), event.severity))
                    .collect();
                (name.clone(), events)
            })
            .collect()
    }

    /// Picks an event uniformly from `category`, then an outcome uniformly
    /// from that event's severity pool.
    pub fn random_event<R: Rng + ?Sized>(
        &self,
        category: &str,
        rng: &mut R,
    ) -> Result<EventDraw, NotFound> {
        let event = self
            .events(category)
            .and_then(|events| events.choose(&mut *rng))
            .ok_or_else(|| NotFound::Category(category.to_string()))?;
        let outcome = self.draw_outcome(event.severity, rng)?;

        Ok(EventDraw {
            event: event.name.clone(),
            severity: event.severity,
            outcome: outcome.to_string(),
        })
    }

    /// Picks an outcome uniformly from the pool for `label`.
    pub fn random_outcome<'a, R: Rng + ?Sized>(
        &'a self,
        label: &str,
        rng: &mut R,
    ) -> Result<&'a str, NotFound> {
        let severity =
            Severity::parse(label).ok_or_else(|| NotFound::Severity(label.to_string()))?;
        self.draw_outcome(severity, rng)
    }

    pub fn draw_outcome<'a, R: Rng + ?Sized>(
        &'a self,
        severity: Severity,
        rng: &mut R,
    ) -> Result<&'a str, NotFound> {
        self.outcomes(severity)
            .and_then(|pool| pool.choose(rng))
            .map(String::as_str)
            .ok_or_else(|| NotFound::Severity(severity.label().to_string()))
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn events(&self, category: &str) -> Option<&[CatalogEvent]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    pub fn outcomes(&self, severity: Severity) -> Option<&[String]> {
        self.outcomes.get(&severity).map(Vec::as_slice)
    }

    pub fn severities(&self) -> impl Iterator<Item = Severity> + '_ {
        self.outcomes.keys().copied()
    }

    pub fn event_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }
}
