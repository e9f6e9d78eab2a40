//! ToggleState - Which Layers the User Asked For

use ahash::AHashMap;

use crate::domain::layer::LayerType;

/// On/off per layer type
///
/// Keys are never removed once set; an unknown layer reads as off. The state
/// reflects user intent, not whether the data has arrived.
#[derive(Debug, Clone, Default)]
pub struct ToggleState {
    toggles: AHashMap<LayerType, bool>,
}

impl ToggleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the toggle; returns true when the stored value changed
    pub fn set(&mut self, layer: LayerType, enabled: bool) -> bool {
        let previous = self.toggles.insert(layer, enabled).unwrap_or(false);
        previous != enabled
    }

    pub fn is_on(&self, layer: LayerType) -> bool {
        self.toggles.get(&layer).copied().unwrap_or(false)
    }

    /// Layers currently switched on, in registry order
    pub fn enabled(&self) -> Vec<LayerType> {
        LayerType::ALL
            .into_iter()
            .filter(|layer| self.is_on(*layer))
            .collect()
    }

    /// Whether `layer` has ever been set
    pub fn is_known(&self, layer: LayerType) -> bool {
        self.toggles.contains_key(&layer)
    }
}
