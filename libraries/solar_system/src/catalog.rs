//! Fixed catalog of the bodies making up the scene.

use crate::body::BodyId;
use crate::locale::Locale;
use crate::orbit::Orbit;
use procedural_texture::{Pattern, Rgb};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDescriptor {
    pub id: BodyId,
    /// Native display name.
    pub name: &'static str,
    /// Name rendered onto the label billboard.
    pub english_name: &'static str,
    pub radius: f32,
    pub color: Rgb,
    /// Distance from the central body; zero for the central body itself.
    pub orbit_radius: f32,
    pub pattern: Pattern,
}

impl BodyDescriptor {
    const fn new(id: BodyId, radius: f32, color: u32, orbit_radius: f32, pattern: Pattern) -> Self {
        Self {
            id,
            name: Locale::Chinese.body_name(id),
            english_name: Locale::English.body_name(id),
            radius,
            color: Rgb::from_hex(color),
            orbit_radius,
            pattern,
        }
    }

    pub fn is_central(&self) -> bool {
        self.orbit_radius == 0.0
    }

    pub fn orbit(&self) -> Option<Orbit> {
        Orbit::new(self.orbit_radius)
    }
}

static CATALOG: [BodyDescriptor; 10] = [
    BodyDescriptor::new(BodyId::Sun, 5.0, 0xFFD700, 0.0, Pattern::Circles),
    BodyDescriptor::new(BodyId::Mercury, 0.8, 0xA0522D, 8.0, Pattern::Dots),
    BodyDescriptor::new(BodyId::Venus, 1.2, 0xDEB887, 12.0, Pattern::Stripes),
    BodyDescriptor::new(BodyId::Earth, 1.4, 0x4169E1, 16.0, Pattern::Grid),
    BodyDescriptor::new(BodyId::Mars, 1.0, 0xCD5C5C, 20.0, Pattern::Dots),
    BodyDescriptor::new(BodyId::Jupiter, 3.0, 0xDAA520, 26.0, Pattern::Stripes),
    BodyDescriptor::new(BodyId::Saturn, 2.5, 0xF4A460, 32.0, Pattern::Swirl),
    BodyDescriptor::new(BodyId::Uranus, 1.8, 0x87CEEB, 38.0, Pattern::Grid),
    BodyDescriptor::new(BodyId::Neptune, 1.7, 0x1E90FF, 44.0, Pattern::Circles),
    BodyDescriptor::new(BodyId::Pluto, 0.6, 0x8B4513, 50.0, Pattern::Dots),
];

pub fn catalog() -> &'static [BodyDescriptor; 10] {
    &CATALOG
}

pub fn descriptor(id: BodyId) -> &'static BodyDescriptor {
    &CATALOG[id as usize]
}
