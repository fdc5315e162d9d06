use serde::{Deserialize, Serialize};

/// Patient context for weight-based dosing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    weight_kg: f64,
}

impl Patient {
    /// Create a patient with the given body weight in kg
    pub fn new(weight_kg: f64) -> Self {
        Patient { weight_kg }
    }

    /// Body weight in kg
    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    /// Replace the body weight (kg)
    pub fn set_weight_kg(&mut self, weight_kg: f64) {
        self.weight_kg = weight_kg;
    }

    /// Whether the weight can support weight-based dose math
    pub fn has_valid_weight(&self) -> bool {
        self.weight_kg.is_finite() && self.weight_kg > 0.0
    }
}

impl Default for Patient {
    /// A 60 kg adult, the usual starting point before the real weight is entered
    fn default() -> Self {
        Patient { weight_kg: 60.0 }
    }
}
