//! Named scalar fields derived from one noise source.
//!
//! A body type declares its fields once as a static [`FrequencyStack`]; at
//! every surface point the stack is evaluated into [`Fields`], which the
//! feature layers read by name.

use glam::DVec3;
use noise::NoiseFn;

use crate::fractal::Composition;
use crate::seed::{det_cos, det_sin};

/// One named field: a composition sampled at `point * frequency + offset`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldSpec {
    /// Name the feature layers look the value up by.
    pub name: &'static str,
    /// How octaves are combined.
    pub composition: Composition,
    /// Base frequency applied to the world-space point.
    pub frequency: f64,
    /// Octave count.
    pub octaves: u32,
    /// Offset that decorrelates fields sharing one noise source.
    pub offset: DVec3,
    /// Extra spin about the vertical axis, in multiples of the animation phase.
    /// Lets cloud decks drift relative to the ground below them.
    pub drift: f64,
}

impl FieldSpec {
    /// A field with no offset and no drift.
    pub const fn new(
        name: &'static str,
        composition: Composition,
        frequency: f64,
        octaves: u32,
    ) -> Self {
        Self {
            name,
            composition,
            frequency,
            octaves,
            offset: DVec3::ZERO,
            drift: 0.0,
        }
    }

    /// Shorthand for an fbm field.
    pub const fn fbm(name: &'static str, frequency: f64, octaves: u32) -> Self {
        Self::new(name, Composition::Fbm, frequency, octaves)
    }

    /// Shorthand for a turbulence field.
    pub const fn turbulence(name: &'static str, frequency: f64, octaves: u32) -> Self {
        Self::new(name, Composition::Turbulence, frequency, octaves)
    }

    /// Shorthand for a ridged field.
    pub const fn ridged(name: &'static str, frequency: f64, octaves: u32) -> Self {
        Self::new(name, Composition::Ridged, frequency, octaves)
    }

    /// Set the sampling offset.
    pub const fn offset(mut self, x: f64, y: f64, z: f64) -> Self {
        self.offset = DVec3::new(x, y, z);
        self
    }

    /// Set the drift multiplier.
    pub const fn drift(mut self, drift: f64) -> Self {
        self.drift = drift;
        self
    }

    /// Evaluate this field at a world-space point for the given animation phase.
    pub fn evaluate<N>(&self, noise: &N, world: DVec3, phase: f64) -> f64
    where
        N: NoiseFn<f64, 3> + ?Sized,
    {
        let point = if self.drift != 0.0 {
            rotate_y(world, phase * self.drift)
        } else {
            world
        };
        self.composition
            .sample(noise, point * self.frequency + self.offset, self.octaves)
    }
}

/// An ordered, static list of field specs for one body type.
#[derive(Clone, Copy, Debug)]
pub struct FrequencyStack {
    specs: &'static [FieldSpec],
}

impl FrequencyStack {
    /// Wrap a static spec table.
    pub const fn new(specs: &'static [FieldSpec]) -> Self {
        Self { specs }
    }

    /// The specs in evaluation order.
    pub fn specs(&self) -> &'static [FieldSpec] {
        self.specs
    }

    /// Evaluate every field at `world`, replacing the contents of `out`.
    pub fn evaluate_into<N>(&self, noise: &N, world: DVec3, phase: f64, out: &mut Fields)
    where
        N: NoiseFn<f64, 3> + ?Sized,
    {
        out.values.clear();
        for spec in self.specs {
            out.values
                .push((spec.name, spec.evaluate(noise, world, phase)));
        }
    }

    /// Evaluate every field at `world` into a fresh [`Fields`].
    pub fn evaluate<N>(&self, noise: &N, world: DVec3, phase: f64) -> Fields
    where
        N: NoiseFn<f64, 3> + ?Sized,
    {
        let mut out = Fields::with_capacity(self.specs.len());
        self.evaluate_into(noise, world, phase, &mut out);
        out
    }
}

/// Scalar field values at one surface point, looked up by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fields {
    values: Vec<(&'static str, f64)>,
}

impl Fields {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty set with room for `capacity` fields.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    /// Value of `name`, or `0.0` if the stack has no such field.
    pub fn get(&self, name: &str) -> f64 {
        self.values
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
            .unwrap_or(0.0)
    }

    /// Insert or overwrite a value.
    pub fn set(&mut self, name: &'static str, value: f64) {
        match self.values.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((name, value)),
        }
    }

    /// Builder form of [`Fields::set`].
    pub fn with(mut self, name: &'static str, value: f64) -> Self {
        self.set(name, value);
        self
    }

    /// Number of stored fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no fields are stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn rotate_y(p: DVec3, angle: f64) -> DVec3 {
    let (s, c) = (det_sin(angle), det_cos(angle));
    DVec3::new(p.x * c + p.z * s, p.y, -p.x * s + p.z * c)
}
