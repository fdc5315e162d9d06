//! Integration tests for bicarbonate correction planning
//!
//! Works through the standard 60 kg / 18 → 24 mEq/L correction and the
//! variants a ward would actually run, then the rejection paths.

use approx::assert_relative_eq;
use infusol::bicarb::{
    plan_correction, CorrectionRequest, DropFactor, PhaseKind, PlanError, PlanOptions,
    PlanWarning,
};
use infusol::InfusolError;

// ═══════════════════════════════════════════════════════════════════════════════
// Deficit Math
// ═══════════════════════════════════════════════════════════════════════════════

mod deficit {
    use super::*;

    #[test]
    fn test_standard_correction() {
        let plan = CorrectionRequest::new(60.0, 24.0).plan().unwrap();

        // 0.5 × 60 × (24 − 18) = 180 mEq
        assert_relative_eq!(plan.deficit_meq, 180.0);
        // 180 / 595 × 1000 = 302.5210 mL of stock
        assert_relative_eq!(plan.required_sbc_ml, 302.5210, epsilon = 1e-4);
        // 302.52 / 10 = 30.2521 ampules
        assert_relative_eq!(plan.required_ampules, 30.2521, epsilon = 1e-4);
        // 595 × 10 / 1000 = 5.95 mmol per ampule
        assert_relative_eq!(plan.mmol_per_ampule, 5.95);
    }

    #[test]
    fn test_explicit_current_hco3() {
        // 0.5 × 80 × (22 − 10) = 480 mEq
        let plan = CorrectionRequest::new(80.0, 22.0)
            .with_current_hco3(10.0)
            .plan()
            .unwrap();
        assert_relative_eq!(plan.deficit_meq, 480.0);
    }

    #[test]
    fn test_deficit_scales_with_weight() {
        let small = CorrectionRequest::new(30.0, 24.0).plan().unwrap();
        let large = CorrectionRequest::new(120.0, 24.0).plan().unwrap();
        assert_relative_eq!(large.deficit_meq, 4.0 * small.deficit_meq);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Administration Schedules
// ═══════════════════════════════════════════════════════════════════════════════

mod schedules {
    use super::*;

    #[test]
    fn test_phase_split() {
        let plan = CorrectionRequest::new(60.0, 24.0).plan().unwrap();

        // Half the stock in each phase
        assert_relative_eq!(plan.undiluted.loading.sbc_volume_ml, 151.2605, epsilon = 1e-4);
        assert_relative_eq!(
            plan.undiluted.maintenance.sbc_volume_ml,
            151.2605,
            epsilon = 1e-4
        );
        assert_relative_eq!(plan.undiluted.loading.duration_hr, 4.0);
        assert_relative_eq!(plan.undiluted.maintenance.duration_hr, 20.0);
    }

    #[test]
    fn test_undiluted_rates() {
        let plan = CorrectionRequest::new(60.0, 24.0).plan().unwrap();

        // 151.26 / 4 = 37.8151 mL/hr, 151.26 / 20 = 7.5630 mL/hr
        assert_relative_eq!(plan.undiluted.loading.rate_ml_hr, 37.8151, epsilon = 1e-4);
        assert_relative_eq!(plan.undiluted.maintenance.rate_ml_hr, 7.5630, epsilon = 1e-4);

        // Pump only; no drip counting for neat stock
        assert!(plan.undiluted.loading.drops_per_min.is_none());
        assert!(plan.undiluted.maintenance.drops_per_min.is_none());
    }

    #[test]
    fn test_diluted_rates() {
        let plan = CorrectionRequest::new(60.0, 24.0).plan().unwrap();

        // (151.26 + 500) / 4 = 162.8151 mL/hr
        assert_relative_eq!(plan.diluted.loading.rate_ml_hr, 162.8151, epsilon = 1e-4);
        assert_relative_eq!(plan.diluted.loading.d5_volume_ml, 500.0);
        assert_relative_eq!(plan.diluted.loading.total_volume_ml, 651.2605, epsilon = 1e-4);

        // (151.26 + 500) / 20 = 32.5630 mL/hr
        assert_relative_eq!(plan.diluted.maintenance.rate_ml_hr, 32.5630, epsilon = 1e-4);
    }

    #[test]
    fn test_diluted_drip_rates() {
        let plan = CorrectionRequest::new(60.0, 24.0).plan().unwrap();

        // 162.8151 × 16 / 60 = 43.4174 drops/min
        assert_relative_eq!(
            plan.diluted.loading.drops_per_min.unwrap(),
            43.4174,
            epsilon = 1e-4
        );
        // 32.5630 × 16 / 60 = 8.6835 drops/min
        assert_relative_eq!(
            plan.diluted.maintenance.drops_per_min.unwrap(),
            8.6835,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_two_bag_rates() {
        let plan = CorrectionRequest::new(60.0, 24.0).plan().unwrap();

        // D5 top-up to 500 mL: 500 − 151.26 = 348.7395 mL
        let loading = &plan.two_bag.loading;
        assert_relative_eq!(loading.d5_volume_ml, 348.7395, epsilon = 1e-4);
        assert_relative_eq!(loading.total_volume_ml, 500.0);
        // 500 / 4 = 125 mL/hr at 33.3333 drops/min
        assert_relative_eq!(loading.rate_ml_hr, 125.0);
        assert_relative_eq!(loading.drops_per_min.unwrap(), 33.3333, epsilon = 1e-4);

        // 500 / 20 = 25 mL/hr at 6.6667 drops/min
        let maintenance = &plan.two_bag.maintenance;
        assert_relative_eq!(maintenance.rate_ml_hr, 25.0);
        assert_relative_eq!(maintenance.drops_per_min.unwrap(), 6.6667, epsilon = 1e-4);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Giving Sets
// ═══════════════════════════════════════════════════════════════════════════════

mod giving_sets {
    use super::*;

    #[test]
    fn test_microdrip_matches_rate() {
        // At 60 drops/mL, drops/min equals mL/hr
        let plan = CorrectionRequest::new(60.0, 24.0)
            .with_drop_factor(DropFactor::MICRO_60)
            .plan()
            .unwrap();
        assert_relative_eq!(plan.two_bag.loading.drops_per_min.unwrap(), 125.0);
        assert_relative_eq!(
            plan.diluted.loading.drops_per_min.unwrap(),
            plan.diluted.loading.rate_ml_hr
        );
    }

    #[test]
    fn test_coarse_macrodrip() {
        // 125 × 10 / 60 = 20.8333 drops/min
        let plan = CorrectionRequest::new(60.0, 24.0)
            .with_drop_factor(DropFactor::MACRO_10)
            .plan()
            .unwrap();
        assert_relative_eq!(
            plan.two_bag.loading.drops_per_min.unwrap(),
            20.8333,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_custom_giving_set() {
        // A bespoke 8 drops/mL set can be built; a degenerate one cannot
        let custom = DropFactor::new(8.0).unwrap();
        let plan = CorrectionRequest::new(60.0, 24.0)
            .with_drop_factor(custom)
            .plan()
            .unwrap();
        // 125 × 8 / 60 = 16.6667 drops/min
        assert_relative_eq!(
            plan.two_bag.loading.drops_per_min.unwrap(),
            16.6667,
            epsilon = 1e-4
        );

        assert!(DropFactor::new(0.0).is_none());
        assert!(DropFactor::new(-15.0).is_none());
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Validation
// ═══════════════════════════════════════════════════════════════════════════════

mod validation {
    use super::*;

    #[test]
    fn test_rejects_target_equal_to_current() {
        let err = CorrectionRequest::new(60.0, 18.0).plan().unwrap_err();
        assert_eq!(
            err,
            PlanError::TargetNotAboveCurrent {
                target: 18.0,
                current: 18.0
            }
        );
    }

    #[test]
    fn test_rejects_target_below_current() {
        let err = CorrectionRequest::new(60.0, 24.0)
            .with_current_hco3(30.0)
            .plan()
            .unwrap_err();
        assert!(matches!(err, PlanError::TargetNotAboveCurrent { .. }));
    }

    #[test]
    fn test_rejects_zero_and_negative_weight() {
        assert_eq!(
            CorrectionRequest::new(0.0, 24.0).plan().unwrap_err(),
            PlanError::NonPositiveWeight { weight_kg: 0.0 }
        );
        assert!(CorrectionRequest::new(-60.0, 24.0).plan().is_err());
    }

    #[test]
    fn test_rejects_non_finite_fields() {
        assert_eq!(
            CorrectionRequest::new(f64::NAN, 24.0).plan().unwrap_err(),
            PlanError::NotFinite { field: "weight_kg" }
        );
        assert_eq!(
            CorrectionRequest::new(60.0, f64::NAN).plan().unwrap_err(),
            PlanError::NotFinite {
                field: "target_hco3"
            }
        );
    }

    #[test]
    fn test_error_messages_name_the_values() {
        let err = CorrectionRequest::new(60.0, 12.0).plan().unwrap_err();
        let message = format!("{}", err);
        assert!(message.contains("12"));
        assert!(message.contains("18"));
    }

    #[test]
    fn test_rejects_zero_phase_duration() {
        // A zero-hour phase would push its rate to infinity
        let options = PlanOptions::default().with_loading_hours(0.0);
        let err = CorrectionRequest::new(60.0, 24.0)
            .plan_with(&options)
            .unwrap_err();
        assert_eq!(
            err,
            PlanError::NonPositiveOption {
                field: "loading_hours",
                value: 0.0
            }
        );
    }

    #[test]
    fn test_rejects_zero_stock_concentration() {
        // Zero stock strength would make the required volume infinite
        let options = PlanOptions::default().with_sbc_mmol_per_l(0.0);
        let err = CorrectionRequest::new(60.0, 24.0)
            .plan_with(&options)
            .unwrap_err();
        assert!(matches!(err, PlanError::NonPositiveOption { .. }));
    }

    #[test]
    fn test_rejects_negative_volume_options() {
        let bag = PlanOptions::default().with_d5_bag_volume_ml(-500.0);
        assert!(CorrectionRequest::new(60.0, 24.0).plan_with(&bag).is_err());

        let ampule = PlanOptions::default().with_ampule_volume_ml(-10.0);
        assert!(CorrectionRequest::new(60.0, 24.0).plan_with(&ampule).is_err());
    }

    #[test]
    fn test_rejects_loading_fraction_outside_unit_interval() {
        let over = PlanOptions::default().with_loading_fraction(1.25);
        assert_eq!(
            CorrectionRequest::new(60.0, 24.0)
                .plan_with(&over)
                .unwrap_err(),
            PlanError::LoadingFractionOutOfRange { fraction: 1.25 }
        );

        let negative = PlanOptions::default().with_loading_fraction(-0.5);
        assert!(CorrectionRequest::new(60.0, 24.0).plan_with(&negative).is_err());
    }

    #[test]
    fn test_rejects_non_finite_options() {
        let options = PlanOptions::default().with_maintenance_hours(f64::INFINITY);
        assert_eq!(
            CorrectionRequest::new(60.0, 24.0)
                .plan_with(&options)
                .unwrap_err(),
            PlanError::NotFinite {
                field: "maintenance_hours"
            }
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Bag Overflow
// ═══════════════════════════════════════════════════════════════════════════════

mod overflow {
    use super::*;

    #[test]
    fn test_large_deficit_overflows_both_bags() {
        // 0.5 × 400 × 6 = 1200 mEq needs 1008 mL of stock per phase
        let plan = CorrectionRequest::new(400.0, 24.0).plan().unwrap();

        assert_eq!(plan.warnings.len(), 2);
        assert!(matches!(
            plan.warnings[0],
            PlanWarning::BagOverflow {
                phase: PhaseKind::Loading,
                ..
            }
        ));
        assert!(matches!(
            plan.warnings[1],
            PlanWarning::BagOverflow {
                phase: PhaseKind::Maintenance,
                ..
            }
        ));

        // The bag holds its volume; the D5 share drops to zero
        assert_relative_eq!(plan.two_bag.loading.d5_volume_ml, 0.0);
        assert_relative_eq!(plan.two_bag.loading.total_volume_ml, 500.0);
        assert_relative_eq!(plan.two_bag.loading.rate_ml_hr, 125.0);
    }

    #[test]
    fn test_standard_correction_has_no_warnings() {
        let plan = CorrectionRequest::new(60.0, 24.0).plan().unwrap();
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn test_warning_display_names_phase() {
        let plan = CorrectionRequest::new(400.0, 24.0).plan().unwrap();
        let message = format!("{}", plan.warnings[0]);
        assert!(message.contains("Loading"));
        assert!(message.contains("500"));
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Options
// ═══════════════════════════════════════════════════════════════════════════════

mod options {
    use super::*;

    #[test]
    fn test_custom_stock_concentration() {
        // A 1000 mmol/L product needs less volume: 180 / 1000 × 1000 = 180 mL
        let options = PlanOptions::default().with_sbc_mmol_per_l(1000.0);
        let plan = CorrectionRequest::new(60.0, 24.0)
            .plan_with(&options)
            .unwrap();
        assert_relative_eq!(plan.required_sbc_ml, 180.0);
        assert_relative_eq!(plan.required_ampules, 18.0);
        assert_relative_eq!(plan.mmol_per_ampule, 10.0);
    }

    #[test]
    fn test_front_loaded_split() {
        // Entire deficit in the loading phase
        let options = PlanOptions::default().with_loading_fraction(1.0);
        let plan = CorrectionRequest::new(60.0, 24.0)
            .plan_with(&options)
            .unwrap();

        assert_relative_eq!(plan.undiluted.loading.sbc_volume_ml, 302.5210, epsilon = 1e-4);
        assert_relative_eq!(plan.undiluted.maintenance.sbc_volume_ml, 0.0);
        assert_relative_eq!(plan.undiluted.maintenance.rate_ml_hr, 0.0);
        // An empty maintenance phase still hangs a full D5 bag
        assert_relative_eq!(plan.two_bag.maintenance.total_volume_ml, 500.0);
    }

    #[test]
    fn test_custom_phase_durations() {
        let options = PlanOptions::default()
            .with_loading_hours(2.0)
            .with_maintenance_hours(22.0);
        let plan = CorrectionRequest::new(60.0, 24.0)
            .plan_with(&options)
            .unwrap();

        // 151.26 / 2 = 75.6303 mL/hr
        assert_relative_eq!(plan.undiluted.loading.rate_ml_hr, 75.6303, epsilon = 1e-4);
        // 151.26 / 22 = 6.8755 mL/hr
        assert_relative_eq!(plan.undiluted.maintenance.rate_ml_hr, 6.8755, epsilon = 1e-4);
    }

    #[test]
    fn test_smaller_bag_overflows_sooner() {
        let options = PlanOptions::default().with_d5_bag_volume_ml(100.0);
        let plan = CorrectionRequest::new(60.0, 24.0)
            .plan_with(&options)
            .unwrap();

        // 151.26 mL of stock cannot fit a 100 mL bag
        assert_eq!(plan.warnings.len(), 2);
        assert_relative_eq!(plan.two_bag.loading.total_volume_ml, 100.0);
        assert_relative_eq!(plan.diluted.loading.total_volume_ml, 251.2605, epsilon = 1e-4);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// One-Call Entry
// ═══════════════════════════════════════════════════════════════════════════════

mod one_call {
    use super::*;

    #[test]
    fn test_matches_builder_path() {
        let plan = plan_correction(60.0, 24.0, 18.0, DropFactor::MACRO_16).unwrap();
        let built = CorrectionRequest::new(60.0, 24.0).plan().unwrap();
        assert_eq!(plan, built);
    }

    #[test]
    fn test_wraps_plan_error() {
        let err = plan_correction(60.0, 18.0, 18.0, DropFactor::MACRO_16).unwrap_err();
        assert!(matches!(
            err,
            InfusolError::PlanError(PlanError::TargetNotAboveCurrent { .. })
        ));
        // The crate-level message keeps the module error's detail
        let message = format!("{}", err);
        assert!(message.contains("correction plan"));
        assert!(message.contains("18"));
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Output
// ═══════════════════════════════════════════════════════════════════════════════

mod output {
    use super::*;

    #[test]
    fn test_display_renders_all_variants() {
        let plan = CorrectionRequest::new(60.0, 24.0).plan().unwrap();
        let rendered = format!("{}", plan);

        assert!(rendered.contains("Bicarbonate Correction"));
        assert!(rendered.contains("180.00"));
        assert!(rendered.contains("UNDILUTED"));
        assert!(rendered.contains("DILUTED IN D5"));
        assert!(rendered.contains("TWO-BAG"));
        assert!(rendered.contains("drops/min"));
        assert!(!rendered.contains("WARNINGS"));
    }

    #[test]
    fn test_display_includes_warnings() {
        let plan = CorrectionRequest::new(400.0, 24.0).plan().unwrap();
        let rendered = format!("{}", plan);
        assert!(rendered.contains("WARNINGS"));
    }

    #[test]
    fn test_plan_serializes() {
        let plan = CorrectionRequest::new(60.0, 24.0).plan().unwrap();
        let json = serde_json::to_string(&plan).expect("Should serialize");
        let back: infusol::bicarb::CorrectionPlan =
            serde_json::from_str(&json).expect("Should deserialize");

        assert_relative_eq!(back.deficit_meq, plan.deficit_meq);
        assert_relative_eq!(back.two_bag.loading.rate_ml_hr, 125.0);
        assert_eq!(back.warnings, plan.warnings);
    }

    #[test]
    fn test_request_serializes() {
        let request = CorrectionRequest::new(60.0, 24.0)
            .with_current_hco3(16.0)
            .with_drop_factor(DropFactor::MICRO_60);
        let json = serde_json::to_string(&request).expect("Should serialize");
        let back: CorrectionRequest = serde_json::from_str(&json).expect("Should deserialize");
        assert_eq!(back, request);
    }
}
