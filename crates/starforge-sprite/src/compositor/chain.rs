//! Ordered first-match layer tables.

use starforge_noise::Fields;

use super::{FrameContext, LayerHit, Shade};
use crate::palette::PaletteSet;

/// Everything a layer predicate or colorer may read.
pub struct LayerInput<'a, S, T> {
    pub sample: &'a S,
    pub fields: &'a Fields,
    pub palette: &'a PaletteSet,
    pub tuning: &'a T,
    pub ctx: &'a FrameContext<'a>,
}

/// How a layer decides whether it matches and what it draws.
pub enum LayerRule<S: 'static, T: 'static> {
    /// Separate predicate and colorer, for cheap tests.
    Split {
        matches: for<'a> fn(&LayerInput<'a, S, T>) -> bool,
        color: for<'a> fn(&LayerInput<'a, S, T>) -> Shade,
    },
    /// One pass that returns the shade when it matches, for layers whose
    /// test and color share an expensive noise lookup.
    Fused(for<'a> fn(&LayerInput<'a, S, T>) -> Option<Shade>),
}

/// One feature layer: a named rule.
pub struct Layer<S: 'static, T: 'static> {
    pub name: &'static str,
    pub rule: LayerRule<S, T>,
}

impl<S: 'static, T: 'static> Layer<S, T> {
    pub const fn new(
        name: &'static str,
        matches: for<'a> fn(&LayerInput<'a, S, T>) -> bool,
        color: for<'a> fn(&LayerInput<'a, S, T>) -> Shade,
    ) -> Self {
        Self {
            name,
            rule: LayerRule::Split { matches, color },
        }
    }

    pub const fn fused(name: &'static str, shade: for<'a> fn(&LayerInput<'a, S, T>) -> Option<Shade>) -> Self {
        Self {
            name,
            rule: LayerRule::Fused(shade),
        }
    }

    /// The layer's shade if it matches `input`.
    pub fn apply(&self, input: &LayerInput<'_, S, T>) -> Option<Shade> {
        match self.rule {
            LayerRule::Split { matches, color } => matches(input).then(|| color(input)),
            LayerRule::Fused(shade) => shade(input),
        }
    }
}

/// Layers evaluated top to bottom; the first whose predicate holds wins.
pub struct PriorityChain<S: 'static, T: 'static> {
    layers: &'static [Layer<S, T>],
}

impl<S: 'static, T: 'static> PriorityChain<S, T> {
    pub const fn new(layers: &'static [Layer<S, T>]) -> Self {
        Self { layers }
    }

    /// The first matching layer's name and shade.
    pub fn resolve(&self, input: &LayerInput<'_, S, T>) -> Option<LayerHit> {
        self.layers.iter().find_map(|layer| {
            layer.apply(input).map(|shade| LayerHit {
                layer: layer.name,
                shade,
            })
        })
    }

    /// Layer names in priority order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.layers.iter().map(|layer| layer.name)
    }
}

/// Always-true predicate for base layers.
pub fn always<S, T>(_: &LayerInput<'_, S, T>) -> bool {
    true
}
