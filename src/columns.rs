//! Column roles of the processed heart-disease training set.

/// Continuous measurements.
pub const NUMERIC_COLUMNS: [&str; 6] = [
    "Age (in years)",
    "Resting blood pressure (in mm Hg on admission to the hospital)",
    "Serum cholesterol (in mg/dl)",
    "Maximum heart rate achieved",
    "ST depression induced by exercise relative to rest",
    "Number of major vessels (0–3) colored by fluoroscopy",
];

/// Discrete labels; rows missing any of these are dropped before analysis.
pub const CATEGORICAL_COLUMNS: [&str; 7] = [
    "Sex",
    "Chest pain type",
    "Fasting blood sugar > 120 mg/dl",
    "Resting electrocardiographic results",
    "Exercise-induced angina",
    "Slope of the peak exercise ST segment",
    "Thalassemia",
];

const MAX_LABEL_CHARS: usize = 28;

/// Plot label for a column: the name before any parenthesised unit,
/// truncated so axis text stays readable.
pub fn short_label(column: &str) -> String {
    let base = column.split(" (").next().unwrap_or(column).trim();
    if base.chars().count() <= MAX_LABEL_CHARS {
        return base.to_string();
    }
    let mut label: String = base.chars().take(MAX_LABEL_CHARS - 1).collect();
    label.push('…');
    label
}
