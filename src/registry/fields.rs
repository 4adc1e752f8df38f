//! Field identifiers and per-family field registries
//!
//! The registry is the single source of truth for what a field *is*: its key,
//! display label, unit, dimensionality and (for maps) the grid it lives on.
//! Declaration order in a registry is the order used everywhere a variable
//! number of fields is rendered.

use std::fmt;

use crate::solution::{GridId, ModelFamily};

// =================================================================================================
// Field identifiers
// =================================================================================================

/// Known solution fields (type-safe identifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldId {
    // ── series ──────────────────────────────────────────────────────────────
    /// Anode intercalation fraction [-]
    AnodeIntercalation,
    /// Cathode intercalation fraction [-]
    CathodeIntercalation,
    /// Anode terminal (solid-phase) potential [V]
    AnodePotential,
    /// Cathode terminal potential, i.e. the cell voltage [V]
    CathodePotential,
    /// Lumped electrolyte potential (SPM) [V]
    ElectrolytePotential,
    /// External current density [A/m^2]
    CurrentDensity,

    // ── SPM maps ────────────────────────────────────────────────────────────
    /// Solid Li concentration across the anode particle radius [kmol/m^3]
    AnodeParticleConcentration,
    /// Solid Li concentration across the cathode particle radius [kmol/m^3]
    CathodeParticleConcentration,

    // ── P2D maps ────────────────────────────────────────────────────────────
    /// Electrolyte Li-ion concentration across the cell [kmol/m^3]
    ElectrolyteConcentration,
    /// Electrolyte potential across the cell [V]
    ElectrolytePotentialProfile,
    /// Ionic current at control-volume faces [A/m^2]
    IonicCurrent,
    /// Particle surface concentration across the anode [kmol/m^3]
    AnodeSurfaceConcentration,
    /// Solid-phase potential across the anode [V]
    AnodeSolidPotential,
    /// Faradaic reaction rate across the anode [kmol/m^2/s]
    AnodeFaradaicCurrent,
    /// Particle surface concentration across the cathode [kmol/m^3]
    CathodeSurfaceConcentration,
    /// Solid-phase potential across the cathode [V]
    CathodeSolidPotential,
    /// Faradaic reaction rate across the cathode [kmol/m^2/s]
    CathodeFaradaicCurrent,
}

impl FieldId {
    /// Short machine key (stable, used in errors and logs)
    pub fn key(&self) -> &'static str {
        match self {
            FieldId::AnodeIntercalation => "x_an",
            FieldId::CathodeIntercalation => "x_ca",
            FieldId::AnodePotential => "phi_an",
            FieldId::CathodePotential => "phi_ca",
            FieldId::ElectrolytePotential => "phi_el",
            FieldId::CurrentDensity => "i_ext",
            FieldId::AnodeParticleConcentration => "cs_an",
            FieldId::CathodeParticleConcentration => "cs_ca",
            FieldId::ElectrolyteConcentration => "c_el",
            FieldId::ElectrolytePotentialProfile => "phi_el_x",
            FieldId::IonicCurrent => "i_el_x",
            FieldId::AnodeSurfaceConcentration => "cs_an_surf",
            FieldId::AnodeSolidPotential => "phis_an",
            FieldId::AnodeFaradaicCurrent => "j_an",
            FieldId::CathodeSurfaceConcentration => "cs_ca_surf",
            FieldId::CathodeSolidPotential => "phis_ca",
            FieldId::CathodeFaradaicCurrent => "j_ca",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

// =================================================================================================
// Field specifications
// =================================================================================================

/// Dimensionality of a registered field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// One value per saved time
    Series,

    /// `[time × space]` on the given grid
    Map(GridId),
}

/// Static description of one field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub id: FieldId,

    /// Axis / panel label, e.g. `phi_an`
    pub label: &'static str,

    /// Human readable name used as panel title
    pub title: &'static str,

    /// Unit string, passed through to axis labels
    pub unit: &'static str,

    pub shape: Shape,

    /// Conventional value range; samples outside are flagged, never clamped
    pub expected_range: Option<(f64, f64)>,
}

impl FieldSpec {
    const fn series(id: FieldId, label: &'static str, title: &'static str, unit: &'static str) -> Self {
        Self { id, label, title, unit, shape: Shape::Series, expected_range: None }
    }

    const fn fraction(id: FieldId, label: &'static str, title: &'static str) -> Self {
        Self { id, label, title, unit: "-", shape: Shape::Series, expected_range: Some((0.0, 1.0)) }
    }

    const fn map(
        id: FieldId,
        label: &'static str,
        title: &'static str,
        unit: &'static str,
        grid: GridId,
    ) -> Self {
        Self { id, label, title, unit, shape: Shape::Map(grid), expected_range: None }
    }

    pub fn key(&self) -> &'static str {
        self.id.key()
    }

    pub fn is_map(&self) -> bool {
        matches!(self.shape, Shape::Map(_))
    }

    /// Grid of a map field
    pub fn grid(&self) -> Option<GridId> {
        match self.shape {
            Shape::Map(grid) => Some(grid),
            Shape::Series => None,
        }
    }

    /// Value-axis label such as `phi_an [V]`
    pub fn axis_label(&self) -> String {
        format!("{} [{}]", self.label, self.unit)
    }
}

// =================================================================================================
// Registries
// =================================================================================================

const SPM_FIELDS: &[FieldSpec] = &[
    FieldSpec::fraction(FieldId::AnodeIntercalation, "X_Li,an", "Anode intercalation"),
    FieldSpec::fraction(FieldId::CathodeIntercalation, "X_Li,ca", "Cathode intercalation"),
    FieldSpec::series(FieldId::AnodePotential, "phi_an", "Anode potential", "V"),
    FieldSpec::series(FieldId::CathodePotential, "phi_ca", "Cathode potential", "V"),
    FieldSpec::series(FieldId::ElectrolytePotential, "phi_el", "Electrolyte potential", "V"),
    FieldSpec::series(FieldId::CurrentDensity, "i_ext", "Current density", "A/m^2"),
    FieldSpec::map(
        FieldId::AnodeParticleConcentration,
        "C_s,an",
        "Anode particle Li",
        "kmol/m^3",
        GridId::AnodeParticle,
    ),
    FieldSpec::map(
        FieldId::CathodeParticleConcentration,
        "C_s,ca",
        "Cathode particle Li",
        "kmol/m^3",
        GridId::CathodeParticle,
    ),
];

const P2D_FIELDS: &[FieldSpec] = &[
    FieldSpec::fraction(FieldId::AnodeIntercalation, "X_Li,an", "Anode intercalation"),
    FieldSpec::fraction(FieldId::CathodeIntercalation, "X_Li,ca", "Cathode intercalation"),
    FieldSpec::series(FieldId::AnodePotential, "phi_an", "Anode potential", "V"),
    FieldSpec::series(FieldId::CathodePotential, "phi_ca", "Cathode potential", "V"),
    FieldSpec::series(FieldId::CurrentDensity, "i_ext", "Current density", "A/m^2"),
    FieldSpec::map(FieldId::ElectrolyteConcentration, "C_Li+", "Electrolyte Li+", "kmol/m^3", GridId::Cell),
    FieldSpec::map(FieldId::ElectrolytePotentialProfile, "phi_el", "Electrolyte potential", "V", GridId::Cell),
    FieldSpec::map(FieldId::IonicCurrent, "i_el", "Ionic current", "A/m^2", GridId::CellFaces),
    FieldSpec::map(
        FieldId::AnodeSurfaceConcentration,
        "C_s,an",
        "Anode surface Li",
        "kmol/m^3",
        GridId::Anode,
    ),
    FieldSpec::map(FieldId::AnodeSolidPotential, "phi_s,an", "Anode solid potential", "V", GridId::Anode),
    FieldSpec::map(
        FieldId::AnodeFaradaicCurrent,
        "j_Far,an",
        "Anode Faradaic rate",
        "kmol/m^2/s",
        GridId::Anode,
    ),
    FieldSpec::map(
        FieldId::CathodeSurfaceConcentration,
        "C_s,ca",
        "Cathode surface Li",
        "kmol/m^3",
        GridId::Cathode,
    ),
    FieldSpec::map(
        FieldId::CathodeSolidPotential,
        "phi_s,ca",
        "Cathode solid potential",
        "V",
        GridId::Cathode,
    ),
    FieldSpec::map(
        FieldId::CathodeFaradaicCurrent,
        "j_Far,ca",
        "Cathode Faradaic rate",
        "kmol/m^2/s",
        GridId::Cathode,
    ),
];

/// Ordered field declarations of one model family
#[derive(Debug, PartialEq)]
pub struct FieldRegistry {
    family: ModelFamily,
    specs: &'static [FieldSpec],
}

static SPM_REGISTRY: FieldRegistry = FieldRegistry {
    family: ModelFamily::Spm,
    specs: SPM_FIELDS,
};

static P2D_REGISTRY: FieldRegistry = FieldRegistry {
    family: ModelFamily::P2d,
    specs: P2D_FIELDS,
};

impl FieldRegistry {
    /// Registry of a model family
    pub fn for_family(family: ModelFamily) -> &'static FieldRegistry {
        match family {
            ModelFamily::Spm => &SPM_REGISTRY,
            ModelFamily::P2d => &P2D_REGISTRY,
        }
    }

    pub fn family(&self) -> ModelFamily {
        self.family
    }

    /// All declarations, in declaration order
    pub fn specs(&self) -> &'static [FieldSpec] {
        self.specs
    }

    /// Declaration of a field, `None` if the family does not know it
    pub fn spec(&self, id: FieldId) -> Option<&'static FieldSpec> {
        self.specs.iter().find(|spec| spec.id == id)
    }

    /// Map fields, in declaration order
    pub fn map_specs(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.specs.iter().filter(|spec| spec.is_map())
    }
}
