//! Line weight (code 370)

/// Line weight in 1/100 mm, or one of the inherited values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineWeight {
    #[default]
    ByLayer,
    ByBlock,
    Default,
    Value(i16),
}

impl LineWeight {
    pub fn from_value(value: i16) -> Self {
        match value {
            -1 => LineWeight::ByLayer,
            -2 => LineWeight::ByBlock,
            -3 => LineWeight::Default,
            v => LineWeight::Value(v),
        }
    }

    pub fn value(&self) -> i16 {
        match self {
            LineWeight::ByLayer => -1,
            LineWeight::ByBlock => -2,
            LineWeight::Default => -3,
            LineWeight::Value(v) => *v,
        }
    }

    pub fn millimeters(&self) -> Option<f64> {
        match self {
            LineWeight::Value(v) => Some(*v as f64 / 100.0),
            _ => None,
        }
    }
}
