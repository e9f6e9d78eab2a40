//! Layer - Layer Types and the Layer Registry

use serde::{Deserialize, Serialize};
use std::fmt;

/// A category of network asset or risk metric that can be toggled independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerType {
    Buses,
    Lines,
    Transformers,
    Loads,
    Nvri,
    Llri,
    Tlri,
}

impl LayerType {
    /// Every layer type, in registry order
    pub const ALL: [LayerType; 7] = [
        LayerType::Buses,
        LayerType::Transformers,
        LayerType::Lines,
        LayerType::Loads,
        LayerType::Nvri,
        LayerType::Llri,
        LayerType::Tlri,
    ];

    /// Wire name, matching the backend `type` field
    pub fn as_str(&self) -> &'static str {
        match self {
            LayerType::Buses => "buses",
            LayerType::Lines => "lines",
            LayerType::Transformers => "transformers",
            LayerType::Loads => "loads",
            LayerType::Nvri => "nvri",
            LayerType::Llri => "llri",
            LayerType::Tlri => "tlri",
        }
    }

    /// Parse a wire name
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|layer| layer.as_str() == name)
    }

    /// Whether this is a risk index layer rather than a physical asset layer
    pub fn is_risk_index(&self) -> bool {
        matches!(self, LayerType::Nvri | LayerType::Llri | LayerType::Tlri)
    }

    /// Rendering metadata for this layer
    pub fn spec(&self) -> &'static LayerSpec {
        LayerRegistry::spec(*self)
    }
}

impl fmt::Display for LayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendering metadata attached to a layer type
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSpec {
    pub layer: LayerType,
    /// Menu label
    pub name: &'static str,
    /// Fill and line color (RGB)
    pub color: [u8; 3],
    /// Point radius for point geometries, line width scale otherwise
    pub size: f32,
    /// Key of this layer in the bulk metrics response, if it has one
    pub metric_key: Option<&'static str>,
}

static REGISTRY: [LayerSpec; 7] = [
    LayerSpec {
        layer: LayerType::Buses,
        name: "Buses",
        color: [255, 0, 0],
        size: 2.0,
        metric_key: Some("buses"),
    },
    LayerSpec {
        layer: LayerType::Transformers,
        name: "Transformers",
        color: [0, 255, 0],
        size: 15.0,
        metric_key: Some("transformers"),
    },
    LayerSpec {
        layer: LayerType::Lines,
        name: "Lines",
        color: [255, 255, 255],
        size: 5.0,
        metric_key: Some("lines"),
    },
    LayerSpec {
        layer: LayerType::Loads,
        name: "Loads",
        color: [63, 81, 181],
        size: 4.0,
        metric_key: Some("loads"),
    },
    LayerSpec {
        layer: LayerType::Nvri,
        name: "Node Voltage Risk Index",
        color: [255, 140, 0],
        size: 20.0,
        metric_key: None,
    },
    LayerSpec {
        layer: LayerType::Llri,
        name: "Line Loading Risk Index",
        color: [0, 140, 255],
        size: 3.0,
        metric_key: None,
    },
    LayerSpec {
        layer: LayerType::Tlri,
        name: "Transformer Loading Risk Index",
        color: [255, 140, 0],
        size: 20.0,
        metric_key: None,
    },
];

/// The fixed catalog of layer types
pub struct LayerRegistry;

impl LayerRegistry {
    /// All registry entries in menu order
    pub fn all() -> &'static [LayerSpec] {
        &REGISTRY
    }

    /// Entries offered as checkboxes on the assets page
    pub fn toggleable() -> impl Iterator<Item = &'static LayerSpec> {
        REGISTRY.iter().filter(|spec| !spec.layer.is_risk_index())
    }

    /// Look up the spec for a layer type
    pub fn spec(layer: LayerType) -> &'static LayerSpec {
        match layer {
            LayerType::Buses => &REGISTRY[0],
            LayerType::Transformers => &REGISTRY[1],
            LayerType::Lines => &REGISTRY[2],
            LayerType::Loads => &REGISTRY[3],
            LayerType::Nvri => &REGISTRY[4],
            LayerType::Llri => &REGISTRY[5],
            LayerType::Tlri => &REGISTRY[6],
        }
    }
}
