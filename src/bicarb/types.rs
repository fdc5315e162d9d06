//! Correction plan types: results, options, and configuration structures
//!
//! This module defines all public types for bicarbonate correction planning
//! including:
//! - [`CorrectionPlan`]: Complete structured results
//! - [`PlanOptions`]: Configuration options
//! - [`DropFactor`]: Giving set drop factor
//! - Schedule and phase structs

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Configuration Types
// ============================================================================

/// Drop factor of an infusion giving set, in drops per mL
///
/// Gravity sets deliver a fixed number of drops per mL. Macrodrip sets run
/// 10 to 20 drops/mL; microdrip sets run 60 drops/mL.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DropFactor(f64);

impl DropFactor {
    /// 10 drops/mL macrodrip set
    pub const MACRO_10: DropFactor = DropFactor(10.0);
    /// 15 drops/mL macrodrip set
    pub const MACRO_15: DropFactor = DropFactor(15.0);
    /// 16 drops/mL macrodrip set, the usual ward default
    pub const MACRO_16: DropFactor = DropFactor(16.0);
    /// 20 drops/mL macrodrip set
    pub const MACRO_20: DropFactor = DropFactor(20.0);
    /// 60 drops/mL microdrip (burette) set
    pub const MICRO_60: DropFactor = DropFactor(60.0);

    /// Create a drop factor from drops per mL
    ///
    /// Returns `None` unless the factor is positive and finite.
    pub fn new(drops_per_ml: f64) -> Option<Self> {
        if !drops_per_ml.is_finite() || drops_per_ml <= 0.0 {
            return None;
        }
        Some(DropFactor(drops_per_ml))
    }

    /// All standard giving sets, macrodrip first
    pub fn standard_sets() -> [DropFactor; 5] {
        [
            DropFactor::MACRO_10,
            DropFactor::MACRO_15,
            DropFactor::MACRO_16,
            DropFactor::MACRO_20,
            DropFactor::MICRO_60,
        ]
    }

    /// Drops delivered per mL
    pub fn drops_per_ml(&self) -> f64 {
        self.0
    }

    /// Whether this is a microdrip set (60 drops/mL or finer)
    pub fn is_microdrip(&self) -> bool {
        self.0 >= 60.0
    }

    /// Drip rate in drops/min for a pump rate in mL/hr
    ///
    /// drops/min = rate × drop factor / 60
    pub fn drops_per_min(&self, rate_ml_hr: f64) -> f64 {
        rate_ml_hr * self.0 / 60.0
    }
}

impl Default for DropFactor {
    fn default() -> Self {
        DropFactor::MACRO_16
    }
}

impl fmt::Display for DropFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0} drops/mL", self.0)
    }
}

/// Complete correction plan configuration
///
/// The defaults describe the standard 8.4% sodium bicarbonate product and
/// the usual 4 h / 20 h split. Use these options to model a different
/// product or schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanOptions {
    /// Bicarbonate content of the stock solution in mmol/L (default: 595.0, the 8.4% product)
    pub sbc_mmol_per_l: f64,

    /// Volume of one stock ampule in mL (default: 10.0)
    pub ampule_volume_ml: f64,

    /// Fraction of the deficit replaced in the loading phase (default: 0.5)
    pub loading_fraction: f64,

    /// Loading phase duration in hours (default: 4.0)
    pub loading_hours: f64,

    /// Maintenance phase duration in hours (default: 20.0)
    pub maintenance_hours: f64,

    /// D5 bag volume used for dilution and the two-bag variant in mL (default: 500.0)
    pub d5_bag_volume_ml: f64,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            sbc_mmol_per_l: 595.0,
            ampule_volume_ml: 10.0,
            loading_fraction: 0.5,
            loading_hours: 4.0,
            maintenance_hours: 20.0,
            d5_bag_volume_ml: 500.0,
        }
    }
}

impl PlanOptions {
    /// Set the stock solution bicarbonate content in mmol/L
    pub fn with_sbc_mmol_per_l(mut self, sbc_mmol_per_l: f64) -> Self {
        self.sbc_mmol_per_l = sbc_mmol_per_l;
        self
    }

    /// Set the stock ampule volume in mL
    pub fn with_ampule_volume_ml(mut self, ampule_volume_ml: f64) -> Self {
        self.ampule_volume_ml = ampule_volume_ml;
        self
    }

    /// Set the fraction of the deficit replaced in the loading phase
    pub fn with_loading_fraction(mut self, loading_fraction: f64) -> Self {
        self.loading_fraction = loading_fraction;
        self
    }

    /// Set the loading phase duration in hours
    pub fn with_loading_hours(mut self, loading_hours: f64) -> Self {
        self.loading_hours = loading_hours;
        self
    }

    /// Set the maintenance phase duration in hours
    pub fn with_maintenance_hours(mut self, maintenance_hours: f64) -> Self {
        self.maintenance_hours = maintenance_hours;
        self
    }

    /// Set the D5 bag volume in mL
    pub fn with_d5_bag_volume_ml(mut self, d5_bag_volume_ml: f64) -> Self {
        self.d5_bag_volume_ml = d5_bag_volume_ml;
        self
    }

    /// Bicarbonate content of one ampule in mmol
    pub fn mmol_per_ampule(&self) -> f64 {
        self.sbc_mmol_per_l * self.ampule_volume_ml / 1000.0
    }
}

// ============================================================================
// Result Types
// ============================================================================

/// One phase of an administration schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    /// Stock bicarbonate volume given in this phase (mL)
    pub sbc_volume_ml: f64,
    /// D5 volume co-administered in this phase (mL)
    pub d5_volume_ml: f64,
    /// Total infused volume in this phase (mL)
    pub total_volume_ml: f64,
    /// Phase duration (hr)
    pub duration_hr: f64,
    /// Pump rate over the phase (mL/hr)
    pub rate_ml_hr: f64,
    /// Gravity drip rate (drops/min), when the variant is given by drip
    pub drops_per_min: Option<f64>,
}

/// A loading/maintenance administration schedule for one variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// First phase, replacing the loading fraction of the deficit
    pub loading: Phase,
    /// Second phase, replacing the remainder
    pub maintenance: Phase,
}

/// Complete bicarbonate correction plan
///
/// Holds the deficit math and the three administration variants: undiluted
/// stock on a pump, stock diluted into a D5 bag, and the two-bag form where
/// D5 tops the stock up to a fixed bag volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionPlan {
    /// Bicarbonate deficit (mEq)
    pub deficit_meq: f64,
    /// Stock solution volume containing the deficit (mL)
    pub required_sbc_ml: f64,
    /// Number of stock ampules that volume corresponds to
    pub required_ampules: f64,
    /// Bicarbonate content of one ampule (mmol)
    pub mmol_per_ampule: f64,

    /// Undiluted stock on a syringe pump
    pub undiluted: Schedule,
    /// Full stock volume diluted into one D5 bag per phase
    pub diluted: Schedule,
    /// Two-bag variant, D5 topping each phase up to the bag volume
    pub two_bag: Schedule,

    /// Warnings raised while building the plan
    pub warnings: Vec<PlanWarning>,
}

impl fmt::Display for CorrectionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "╔══════════════════════════════════════╗")?;
        writeln!(f, "║       Bicarbonate Correction         ║")?;
        writeln!(f, "╠══════════════════════════════════════╣")?;
        writeln!(f, "║ Deficit:      {:>9.2} mEq          ║", self.deficit_meq)?;
        writeln!(f, "║ SBC volume:   {:>9.2} mL           ║", self.required_sbc_ml)?;
        writeln!(f, "║ Ampules:      {:>9.2}              ║", self.required_ampules)?;

        write_schedule(f, "UNDILUTED", &self.undiluted)?;
        write_schedule(f, "DILUTED IN D5", &self.diluted)?;
        write_schedule(f, "TWO-BAG (D5 TOP-UP)", &self.two_bag)?;

        if !self.warnings.is_empty() {
            writeln!(f, "╠══════════════════════════════════════╣")?;
            writeln!(f, "║ WARNINGS                             ║")?;
            for w in &self.warnings {
                writeln!(f, "║   • {:<32} ║", format!("{}", w))?;
            }
        }

        writeln!(f, "╚══════════════════════════════════════╝")?;
        Ok(())
    }
}

fn write_schedule(f: &mut fmt::Formatter<'_>, title: &str, schedule: &Schedule) -> fmt::Result {
    writeln!(f, "╠══════════════════════════════════════╣")?;
    writeln!(f, "║ {:<36} ║", title)?;
    write_phase(f, "Loading:    ", &schedule.loading)?;
    write_phase(f, "Maintenance:", &schedule.maintenance)
}

fn write_phase(f: &mut fmt::Formatter<'_>, label: &str, phase: &Phase) -> fmt::Result {
    writeln!(f, "║   {} {:>8.2} mL/hr        ║", label, phase.rate_ml_hr)?;
    if let Some(drops) = phase.drops_per_min {
        writeln!(f, "║     at {:>6.2} drops/min            ║", drops)?;
    }
    Ok(())
}

/// Phase a warning refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseKind {
    /// The loading phase
    Loading,
    /// The maintenance phase
    Maintenance,
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseKind::Loading => write!(f, "Loading"),
            PhaseKind::Maintenance => write!(f, "Maintenance"),
        }
    }
}

/// Correction plan warnings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlanWarning {
    /// A two-bag phase needs at least the whole bag for stock alone
    BagOverflow {
        /// Phase whose stock volume fills the bag
        phase: PhaseKind,
        /// Stock volume planned for the phase (mL)
        sbc_volume_ml: f64,
        /// Configured bag volume (mL)
        bag_volume_ml: f64,
    },
}

impl fmt::Display for PlanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanWarning::BagOverflow {
                phase,
                sbc_volume_ml,
                bag_volume_ml,
            } => {
                write!(
                    f,
                    "{} SBC {:.1} mL fills the {:.0} mL bag",
                    phase, sbc_volume_ml, bag_volume_ml
                )
            }
        }
    }
}
