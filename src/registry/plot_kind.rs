//! Plot kinds and their static field requirements

use std::fmt;

use super::fields::FieldId;
use crate::solution::ModelFamily;

/// Named post-processing plot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlotKind {
    /// Electrolyte Li-ion concentration map (P2D only)
    Electrolyte,

    /// Anode and cathode intercalation fractions vs time
    Intercalation,

    /// One colour map per populated space×time field
    Pixels,

    /// Anode, cathode and electrolyte potentials
    Potentials,

    /// External current density vs time
    Current,

    /// Cell voltage vs time
    Voltage,

    /// Power density vs time
    Power,

    /// Current, voltage and power side by side
    Ivp,
}

impl PlotKind {
    /// Every plot kind, in the order used by `available_plots`
    pub const ALL: [PlotKind; 8] = [
        PlotKind::Electrolyte,
        PlotKind::Intercalation,
        PlotKind::Pixels,
        PlotKind::Potentials,
        PlotKind::Current,
        PlotKind::Voltage,
        PlotKind::Power,
        PlotKind::Ivp,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PlotKind::Electrolyte => "electrolyte",
            PlotKind::Intercalation => "intercalation",
            PlotKind::Pixels => "pixels",
            PlotKind::Potentials => "potentials",
            PlotKind::Current => "current",
            PlotKind::Voltage => "voltage",
            PlotKind::Power => "power",
            PlotKind::Ivp => "ivp",
        }
    }

    /// Fields that must be populated for this plot
    ///
    /// `None` when the family does not offer the plot at all. `Pixels` has no
    /// fixed requirement: it takes whichever map fields are populated.
    pub fn required_fields(&self, family: ModelFamily) -> Option<&'static [FieldId]> {
        use FieldId::*;

        const INTERCALATION: &[FieldId] = &[AnodeIntercalation, CathodeIntercalation];
        const CURRENT: &[FieldId] = &[CurrentDensity];
        const VOLTAGE: &[FieldId] = &[CathodePotential];
        const POWER: &[FieldId] = &[CurrentDensity, CathodePotential];
        const SPM_POTENTIALS: &[FieldId] = &[AnodePotential, CathodePotential, ElectrolytePotential];
        const P2D_POTENTIALS: &[FieldId] = &[
            AnodePotential,
            CathodePotential,
            ElectrolytePotentialProfile,
            AnodeSolidPotential,
            CathodeSolidPotential,
        ];
        const P2D_ELECTROLYTE: &[FieldId] = &[ElectrolyteConcentration];
        const NONE: &[FieldId] = &[];

        match (self, family) {
            (PlotKind::Electrolyte, ModelFamily::Spm) => None,
            (PlotKind::Electrolyte, ModelFamily::P2d) => Some(P2D_ELECTROLYTE),
            (PlotKind::Intercalation, _) => Some(INTERCALATION),
            (PlotKind::Pixels, _) => Some(NONE),
            (PlotKind::Potentials, ModelFamily::Spm) => Some(SPM_POTENTIALS),
            (PlotKind::Potentials, ModelFamily::P2d) => Some(P2D_POTENTIALS),
            (PlotKind::Current, _) => Some(CURRENT),
            (PlotKind::Voltage, _) => Some(VOLTAGE),
            (PlotKind::Power, _) | (PlotKind::Ivp, _) => Some(POWER),
        }
    }

    /// Whether the family offers this plot
    pub fn is_offered_by(&self, family: ModelFamily) -> bool {
        self.required_fields(family).is_some()
    }
}

impl fmt::Display for PlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::FieldRegistry;

    #[test]
    fn test_electrolyte_is_p2d_only() {
        assert!(!PlotKind::Electrolyte.is_offered_by(ModelFamily::Spm));
        assert!(PlotKind::Electrolyte.is_offered_by(ModelFamily::P2d));
    }

    #[test]
    fn test_required_fields_are_registered() {
        for family in [ModelFamily::Spm, ModelFamily::P2d] {
            let registry = FieldRegistry::for_family(family);
            for kind in PlotKind::ALL {
                for id in kind.required_fields(family).unwrap_or(&[]) {
                    assert!(
                        registry.spec(*id).is_some(),
                        "{kind} requires {id} which {family} does not register"
                    );
                }
            }
        }
    }

    #[test]
    fn test_potentials_differ_by_family() {
        let spm = PlotKind::Potentials.required_fields(ModelFamily::Spm).unwrap();
        let p2d = PlotKind::Potentials.required_fields(ModelFamily::P2d).unwrap();
        assert_eq!(spm.len(), 3);
        assert_eq!(p2d.len(), 5);
    }

    #[test]
    fn test_pixels_has_no_fixed_requirement() {
        assert_eq!(PlotKind::Pixels.required_fields(ModelFamily::Spm), Some(&[][..]));
    }

    #[test]
    fn test_names() {
        let names: Vec<_> = PlotKind::ALL.iter().map(|k| k.to_string()).collect();
        assert_eq!(
            names,
            vec!["electrolyte", "intercalation", "pixels", "potentials", "current", "voltage", "power", "ivp"]
        );
    }
}
