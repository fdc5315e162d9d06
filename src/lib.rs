pub mod bicarb;
pub mod data;
pub mod dosing;
pub mod error;

pub use crate::data::*;
pub use crate::dosing::Dose;
pub use error::InfusolError;

/// Round to two decimal places
///
/// Display-layer rounding only. Results keep full precision; round at the
/// last step before showing a number.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

pub mod prelude {
    pub mod bicarb {
        pub use crate::bicarb::{
            plan_correction, CorrectionPlan, CorrectionRequest, DropFactor, Phase, PhaseKind,
            PlanError, PlanOptions, PlanWarning, Schedule,
        };
    }
    pub mod data {
        pub use crate::data::{
            Concentration, DoseBand, DoseUnit, Drug, MassUnit, Patient, Solution,
        };
    }
    pub mod dosing {
        pub use crate::dosing::{Dose, DoseUnit};
    }

    pub use crate::bicarb::{plan_correction, CorrectionRequest, DropFactor, PlanOptions};
    pub use crate::data::*;
    pub use crate::dosing::Dose;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(302.5210084), 302.52);
        assert_eq!(round2(5.5555), 5.56);
        assert_eq!(round2(43.41736), 43.42);
        assert_eq!(round2(125.0), 125.0);
    }
}
