//! Static registry of the icons a module may reference.
//!
//! Icon names stored on the backend are resolved here through an explicit
//! table. An unresolvable name yields the typed [`FALLBACK`] entry, never
//! an error: learners still get a glyph, authors see their typo rendered
//! as a flask.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Icon {
    /// Stable name stored on the backend.
    pub name: &'static str,
    /// Human-readable label shown in the picker.
    pub label: &'static str,
    /// Unicode glyph for text front ends.
    pub glyph: char,
}

pub const FALLBACK: Icon = Icon {
    name: "flask",
    label: "Flask",
    glyph: '⚗',
};

const REGISTRY: &[Icon] = &[
    FALLBACK,
    Icon { name: "atom", label: "Atom", glyph: '⚛' },
    Icon { name: "beaker", label: "Beaker", glyph: '🧪' },
    Icon { name: "molecule", label: "Molecule", glyph: '🧬' },
    Icon { name: "periodic-table", label: "Periodic table", glyph: '🧮' },
    Icon { name: "microscope", label: "Microscope", glyph: '🔬' },
    Icon { name: "burner", label: "Burner", glyph: '🔥' },
    Icon { name: "dropper", label: "Dropper", glyph: '💧' },
    Icon { name: "magnet", label: "Magnet", glyph: '🧲' },
    Icon { name: "battery", label: "Battery", glyph: '🔋' },
    Icon { name: "crystal", label: "Crystal", glyph: '💎' },
    Icon { name: "scale", label: "Scale", glyph: '⚖' },
    Icon { name: "thermometer", label: "Thermometer", glyph: '🌡' },
    Icon { name: "book", label: "Book", glyph: '📖' },
];

#[must_use]
pub fn all() -> &'static [Icon] {
    REGISTRY
}

/// Exact lookup; `None` when the name is not registered.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static Icon> {
    REGISTRY.iter().find(|icon| icon.name == name)
}

/// Lookup with the fallback glyph substituted for unknown names.
#[must_use]
pub fn resolve(name: &str) -> &'static Icon {
    lookup(name).unwrap_or(&FALLBACK)
}
