//! Static color ramps per body kind and variant.
//!
//! Each [`PaletteSet`] holds named [`Ramp`]s, one per feature class, ordered
//! from low to high intensity (or shallow to deep). Every pick goes through
//! [`Ramp::index_for`], which maps a class-local scalar `t` to
//! `clamp(floor(t * (len - 1)), 0, len - 1)`.

mod catalog;

use crate::body::BodyKind;

/// An 8-bit RGB triple.
pub type Rgb = [u8; 3];

/// Grey ramp returned when a set lacks the requested class.
const MISSING_RAMP: &[Rgb] = &[[96, 96, 96], [128, 128, 128], [160, 160, 160]];

/// An ordered color ramp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ramp {
    colors: &'static [Rgb],
}

impl Ramp {
    /// Wrap a static color list.
    pub const fn new(colors: &'static [Rgb]) -> Self {
        Self { colors }
    }

    /// Ramp index for a class-local scalar `t`.
    ///
    /// `NaN` maps to index 0.
    pub fn index_for(&self, t: f64) -> usize {
        let len = self.colors.len();
        if len <= 1 {
            return 0;
        }
        let raw = (t * (len - 1) as f64).floor();
        if raw.is_nan() || raw <= 0.0 {
            0
        } else {
            (raw as usize).min(len - 1)
        }
    }

    /// The color at [`Ramp::index_for`]`(t)`.
    pub fn pick(&self, t: f64) -> Rgb {
        self.colors
            .get(self.index_for(t))
            .copied()
            .unwrap_or(MISSING_RAMP[1])
    }

    /// The colors in order.
    pub fn colors(&self) -> &'static [Rgb] {
        self.colors
    }

    /// Number of colors.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns `true` if the ramp has no colors.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// All ramps for one body kind, shared by one or more variants.
#[derive(Debug)]
pub struct PaletteSet {
    /// Body kind these ramps belong to.
    pub kind: BodyKind,
    /// Variant names served by this set.
    pub variants: &'static [&'static str],
    ramps: &'static [(&'static str, &'static [Rgb])],
}

impl PaletteSet {
    /// Declare a set.
    pub const fn new(
        kind: BodyKind,
        variants: &'static [&'static str],
        ramps: &'static [(&'static str, &'static [Rgb])],
    ) -> Self {
        Self {
            kind,
            variants,
            ramps,
        }
    }

    /// The ramp for `class`, or a neutral grey ramp if the set lacks it.
    pub fn ramp(&self, class: &str) -> Ramp {
        match self.try_ramp(class) {
            Some(ramp) => ramp,
            None => {
                tracing::warn!(kind = %self.kind, class, "palette class missing, using grey");
                Ramp::new(MISSING_RAMP)
            }
        }
    }

    /// The ramp for `class`, if present.
    pub fn try_ramp(&self, class: &str) -> Option<Ramp> {
        self.ramps
            .iter()
            .find(|(name, _)| *name == class)
            .map(|(_, colors)| Ramp::new(colors))
    }

    /// Class names in declaration order.
    pub fn classes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.ramps.iter().map(|(name, _)| *name)
    }

    /// Returns `true` if this set serves `variant`.
    pub fn serves(&self, variant: &str) -> bool {
        self.variants.contains(&variant)
    }
}

/// Lookup over the static palette catalog.
pub struct PaletteTable;

impl PaletteTable {
    /// Every set for `kind`. The first serves the kind's default variant.
    pub fn sets(kind: BodyKind) -> &'static [PaletteSet] {
        match kind {
            BodyKind::Star => catalog::STARS,
            BodyKind::RockyPlanet => catalog::ROCKY_PLANETS,
            BodyKind::GasGiant => catalog::GAS_GIANTS,
            BodyKind::Moon => catalog::MOONS,
            BodyKind::Asteroid => catalog::ASTEROIDS,
            BodyKind::BlackHole => catalog::BLACK_HOLES,
        }
    }

    /// The set serving `variant`, if any.
    pub fn lookup(kind: BodyKind, variant: &str) -> Option<&'static PaletteSet> {
        Self::sets(kind).iter().find(|set| set.serves(variant))
    }

    /// The set serving `variant`, falling back to the kind's default set.
    pub fn resolve(kind: BodyKind, variant: &str) -> &'static PaletteSet {
        match Self::lookup(kind, variant) {
            Some(set) => set,
            None => {
                tracing::debug!(%kind, variant, "unknown variant, using default palette");
                &Self::sets(kind)[0]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOUR: &[Rgb] = &[[0, 0, 0], [1, 1, 1], [2, 2, 2], [3, 3, 3]];

    #[test]
    fn test_index_rule_floor_and_clamp() {
        let ramp = Ramp::new(FOUR);
        assert_eq!(ramp.index_for(0.0), 0);
        assert_eq!(ramp.index_for(0.34), 1);
        assert_eq!(ramp.index_for(0.5), 1);
        assert_eq!(ramp.index_for(0.99), 2);
        assert_eq!(ramp.index_for(1.0), 3);
        assert_eq!(ramp.index_for(7.5), 3);
        assert_eq!(ramp.index_for(-2.0), 0);
        assert_eq!(ramp.index_for(f64::NAN), 0);
    }

    #[test]
    fn test_pick_uses_index_rule() {
        let ramp = Ramp::new(FOUR);
        assert_eq!(ramp.pick(0.7), [2, 2, 2]);
    }

    #[test]
    fn test_single_color_ramp() {
        let ramp = Ramp::new(&[[5, 6, 7]]);
        assert_eq!(ramp.pick(0.9), [5, 6, 7]);
    }

    #[test]
    fn test_every_variant_has_a_set() {
        for kind in BodyKind::ALL {
            for variant in kind.variants() {
                let set = PaletteTable::lookup(kind, variant);
                assert!(set.is_some(), "{kind}/{variant} has no palette set");
                assert_eq!(set.unwrap().kind, kind);
            }
        }
    }

    #[test]
    fn test_default_set_serves_default_variant() {
        for kind in BodyKind::ALL {
            assert!(PaletteTable::sets(kind)[0].serves(kind.default_variant()));
        }
    }

    #[test]
    fn test_unknown_variant_falls_back_to_default() {
        let set = PaletteTable::resolve(BodyKind::Moon, "plaid");
        assert!(set.serves("rocky"));
    }

    #[test]
    fn test_sets_share_class_names_within_kind() {
        for kind in BodyKind::ALL {
            let sets = PaletteTable::sets(kind);
            let reference: Vec<_> = sets[0].classes().collect();
            for set in sets {
                let classes: Vec<_> = set.classes().collect();
                assert_eq!(classes, reference, "{kind} sets disagree on classes");
            }
        }
    }

    #[test]
    fn test_no_empty_ramps() {
        for kind in BodyKind::ALL {
            for set in PaletteTable::sets(kind) {
                for class in set.classes() {
                    assert!(!set.ramp(class).is_empty(), "{kind}/{class} is empty");
                }
            }
        }
    }

    #[test]
    fn test_missing_class_is_grey() {
        let set = PaletteTable::resolve(BodyKind::Star, "g");
        assert!(set.try_ramp("no_such_class").is_none());
        assert_eq!(set.ramp("no_such_class").colors(), MISSING_RAMP);
    }
}
