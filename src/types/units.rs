//! Drawing units ($INSUNITS, block record code 70)

/// Insertion units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Units {
    #[default]
    Unitless,
    Inches,
    Feet,
    Miles,
    Millimeters,
    Centimeters,
    Meters,
    Kilometers,
    Microinches,
    Mils,
    Yards,
    Angstroms,
    Nanometers,
    Microns,
    Decimeters,
    Decameters,
    Hectometers,
    Gigameters,
    AstronomicalUnits,
    LightYears,
    Parsecs,
}

impl Units {
    pub fn from_code(code: i16) -> Self {
        match code {
            1 => Units::Inches,
            2 => Units::Feet,
            3 => Units::Miles,
            4 => Units::Millimeters,
            5 => Units::Centimeters,
            6 => Units::Meters,
            7 => Units::Kilometers,
            8 => Units::Microinches,
            9 => Units::Mils,
            10 => Units::Yards,
            11 => Units::Angstroms,
            12 => Units::Nanometers,
            13 => Units::Microns,
            14 => Units::Decimeters,
            15 => Units::Decameters,
            16 => Units::Hectometers,
            17 => Units::Gigameters,
            18 => Units::AstronomicalUnits,
            19 => Units::LightYears,
            20 => Units::Parsecs,
            _ => Units::Unitless,
        }
    }

    /// Length of one unit in meters, `None` when unitless.
    pub fn meters(&self) -> Option<f64> {
        let m = match self {
            Units::Unitless => return None,
            Units::Inches => 0.0254,
            Units::Feet => 0.3048,
            Units::Miles => 1609.344,
            Units::Millimeters => 0.001,
            Units::Centimeters => 0.01,
            Units::Meters => 1.0,
            Units::Kilometers => 1000.0,
            Units::Microinches => 0.0254e-6,
            Units::Mils => 0.0254e-3,
            Units::Yards => 0.9144,
            Units::Angstroms => 1.0e-10,
            Units::Nanometers => 1.0e-9,
            Units::Microns => 1.0e-6,
            Units::Decimeters => 0.1,
            Units::Decameters => 10.0,
            Units::Hectometers => 100.0,
            Units::Gigameters => 1.0e9,
            Units::AstronomicalUnits => 1.495_978_707e11,
            Units::LightYears => 9.460_730_472_580_8e15,
            Units::Parsecs => 3.085_677_581_49e16,
        };
        Some(m)
    }
}

/// Scale factor converting a length expressed in `from` into `to`.
///
/// Unitless on either side yields 1.0.
pub fn conversion_factor(from: Units, to: Units) -> f64 {
    match (from.meters(), to.meters()) {
        (Some(a), Some(b)) => a / b,
        _ => 1.0,
    }
}
