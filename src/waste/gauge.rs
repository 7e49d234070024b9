use serde::{Deserialize, Serialize};

pub const FULL_THRESHOLD_PERCENT: f64 = 80.0;

/// Plastic value the demo button writes, in the same unit as `plastic_kg`.
const DEMO_FULL_PLASTIC: f64 = 2000.0;

/// Simulated contents of the inorganic compartment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WasteData {
    pub sterofoam_grams: f64,
    pub plastic_kg: f64,
    pub paper_grams: f64,
    pub capacity_grams: f64,
}

impl Default for WasteData {
    fn default() -> Self {
        Self {
            sterofoam_grams: 202.0,
            plastic_kg: 1.5,
            paper_grams: 52.0,
            capacity_grams: 1000.0,
        }
    }
}

impl WasteData {
    pub fn total_grams(&self) -> f64 {
        self.sterofoam_grams + self.plastic_kg * 1000.0 + self.paper_grams
    }

    pub fn fill_percentage(&self) -> f64 {
        (self.total_grams() / self.capacity_grams * 100.0).min(100.0)
    }

    pub fn is_full(&self) -> bool {
        self.fill_percentage() >= FULL_THRESHOLD_PERCENT
    }

    /// The demo button. It writes the same value whatever the label says,
    /// so pressing "Reset Container" does not empty the bin.
    pub fn toggle_fill_demo(&mut self) {
        self.plastic_kg = DEMO_FULL_PLASTIC;
    }

    pub fn demo_button_label(&self) -> &'static str {
        if self.plastic_kg >= 1000.0 {
            "Reset Container"
        } else {
            "Fill Container (Demo)"
        }
    }

    pub fn gauge(&self) -> WasteGauge {
        WasteGauge {
            total_grams: self.total_grams(),
            fill_percentage: self.fill_percentage(),
            is_full: self.is_full(),
            categories: vec![
                WasteCategory {
                    name: "Sterofoam",
                    amount: format!("{} gr", self.sterofoam_grams),
                    color: "#7DD3FC",
                },
                WasteCategory {
                    name: "Plastik",
                    amount: plastic_amount(self.plastic_kg),
                    color: "#0EA5E9",
                },
                WasteCategory {
                    name: "Kertas Minyak",
                    amount: format!("{} gr", self.paper_grams),
                    color: "#0284C7",
                },
            ],
        }
    }
}

// The plastic field is labelled in grams below 1000 and in kilograms above.
fn plastic_amount(value: f64) -> String {
    if value >= 1000.0 {
        format!("{:.1} kg", value / 1000.0)
    } else {
        format!("{value} gr")
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WasteCategory {
    pub name: &'static str,
    pub amount: String,
    pub color: &'static str,
}

/// Everything the inorganic screen derives from [`WasteData`].
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WasteGauge {
    pub total_grams: f64,
    pub fill_percentage: f64,
    pub is_full: bool,
    pub categories: Vec<WasteCategory>,
}
