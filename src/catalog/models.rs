use std::collections::HashSet;
use std::fmt;

use crate::foundation::error::{MockupError, MockupResult};

/// Device generation grouping.
///
/// Used only as a tie-break preference when multiple catalog entries share
/// identical or near-identical dimensions; the newer generation is the sensible
/// default guess.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Series {
    /// iPhone 16 generation.
    #[serde(rename = "16")]
    Sixteen,
    /// iPhone 17 generation.
    #[serde(rename = "17")]
    Seventeen,
}

impl Series {
    /// The most recent generation, preferred when ties must be broken.
    pub fn newest() -> Self {
        Self::Seventeen
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sixteen => write!(f, "16"),
            Self::Seventeen => write!(f, "17"),
        }
    }
}

/// One device entry: unique name, portrait-canonical native resolution, the
/// ordered color lineup, and the generation tag.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct DeviceModel {
    pub name: String,
    /// Native resolution in pixels, stored width <= height (portrait form).
    /// Orientation rotation is a presentation-time transform, never stored.
    pub resolution: (u32, u32),
    pub colors: Vec<String>,
    pub series: Series,
}

impl DeviceModel {
    /// Build a model entry. Colors are owned strings so catalogs can be
    /// assembled from any source, not just the built-in table.
    pub fn new(
        name: impl Into<String>,
        resolution: (u32, u32),
        colors: &[&str],
        series: Series,
    ) -> Self {
        Self {
            name: name.into(),
            resolution,
            colors: colors.iter().map(|c| (*c).to_string()).collect(),
            series,
        }
    }

    /// Whether `color` is one of this model's colorways.
    pub fn has_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }
}

/// Immutable, explicitly constructed device registry.
///
/// Both detection and the HTTP boundary take a `Catalog` value rather than
/// consulting global state, so tests can substitute smaller registries.
/// Iteration order is insertion order, which is also the tie-break order
/// when candidate scores are equal.
#[derive(Clone, Debug)]
pub struct Catalog {
    models: Vec<DeviceModel>,
}

impl Catalog {
    /// Validate and seal a set of models into a registry.
    ///
    /// Rejects non-portrait resolutions, zero-sized resolutions, duplicate or
    /// empty names, and empty or duplicated color lists.
    pub fn new(models: Vec<DeviceModel>) -> MockupResult<Self> {
        let mut names = HashSet::new();
        for model in &models {
            if model.name.trim().is_empty() {
                return Err(MockupError::invalid_catalog("model name must be non-empty"));
            }
            if !names.insert(model.name.as_str()) {
                return Err(MockupError::invalid_catalog(format!(
                    "duplicate model name: {}",
                    model.name
                )));
            }
            let (w, h) = model.resolution;
            if w == 0 || h == 0 {
                return Err(MockupError::invalid_catalog(format!(
                    "{} has a zero-sized resolution",
                    model.name
                )));
            }
            if w > h {
                return Err(MockupError::invalid_catalog(format!(
                    "{} resolution must be portrait-canonical (width <= height)",
                    model.name
                )));
            }
            if model.colors.is_empty() {
                return Err(MockupError::invalid_catalog(format!(
                    "{} must list at least one color",
                    model.name
                )));
            }
            let unique: HashSet<&str> = model.colors.iter().map(String::as_str).collect();
            if unique.len() != model.colors.len() {
                return Err(MockupError::invalid_catalog(format!(
                    "{} lists a duplicate color",
                    model.name
                )));
            }
        }
        Ok(Self { models })
    }

    /// The built-in iPhone 16 and 17 series catalog.
    pub fn iphone() -> Self {
        let models = vec![
            DeviceModel::new(
                "iPhone 16",
                (1179, 2556),
                &["Black", "Pink", "Teal", "Ultramarine", "White"],
                Series::Sixteen,
            ),
            DeviceModel::new(
                "iPhone 16 Plus",
                (1290, 2796),
                &["Black", "Pink", "Teal", "Ultramarine", "White"],
                Series::Sixteen,
            ),
            DeviceModel::new(
                "iPhone 16 Pro",
                (1206, 2622),
                &[
                    "Black Titanium",
                    "Desert Titanium",
                    "Natural Titanium",
                    "White Titanium",
                ],
                Series::Sixteen,
            ),
            DeviceModel::new(
                "iPhone 16 Pro Max",
                (1320, 2868),
                &[
                    "Black Titanium",
                    "Desert Titanium",
                    "Natural Titanium",
                    "White Titanium",
                ],
                Series::Sixteen,
            ),
            DeviceModel::new(
                "iPhone 17",
                (1206, 2622),
                &["Black", "Lavender", "Mist Blue", "Sage", "White"],
                Series::Seventeen,
            ),
            DeviceModel::new(
                "iPhone Air",
                (1242, 2700),
                &[
                    "Cloud White",
                    "Light Gold",
                    "Midnight",
                    "Natural Silver",
                    "Starlight",
                ],
                Series::Seventeen,
            ),
            DeviceModel::new(
                "iPhone 17 Pro",
                (1206, 2622),
                &[
                    "Cosmic Orange",
                    "Deep Blue",
                    "Midnight Titanium",
                    "Sahara Gold",
                ],
                Series::Seventeen,
            ),
            DeviceModel::new(
                "iPhone 17 Pro Max",
                (1320, 2868),
                &[
                    "Cosmic Orange",
                    "Deep Blue",
                    "Midnight Titanium",
                    "Sahara Gold",
                ],
                Series::Seventeen,
            ),
        ];
        // The built-in table is known-good; a validation failure here is a bug.
        match Self::new(models) {
            Ok(catalog) => catalog,
            Err(_) => unreachable!("built-in iPhone catalog is valid"),
        }
    }

    /// Look up a model by its unique name.
    pub fn get(&self, name: &str) -> Option<&DeviceModel> {
        self.models.iter().find(|m| m.name == name)
    }

    /// Iterate models in insertion (tie-break) order.
    pub fn iter(&self) -> impl Iterator<Item = &DeviceModel> {
        self.models.iter()
    }

    /// Number of models in the registry.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/models.rs"]
mod tests;
