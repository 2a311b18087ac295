//! Reference data offered by the reporting UI.

use serde::{Deserialize, Serialize};

/// Kind of behavior a symbol describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolCategory {
    Physical,
    Verbal,
    Social,
    Cyber,
    General,
}

/// A selectable pictogram describing what happened.
///
/// Reports carry the same shape for each selected symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub id: String,
    pub label: String,
    pub category: SymbolCategory,
}

/// A place in or around the school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub icon: String,
}

const SYMBOLS: &[(&str, &str, SymbolCategory)] = &[
    ("everything_fine", "Everything is fine", SymbolCategory::General),
    ("push", "Pousser", SymbolCategory::Physical),
    ("hit", "Frapper", SymbolCategory::Physical),
    ("kick", "Donner un coup de pied", SymbolCategory::Physical),
    ("pull", "Tirer", SymbolCategory::Physical),
    ("insult", "Insulter", SymbolCategory::Verbal),
    ("mock", "Se moquer", SymbolCategory::Verbal),
    ("threat", "Menacer", SymbolCategory::Verbal),
    ("exclude", "Exclure", SymbolCategory::Social),
    ("ignore", "Ignorer", SymbolCategory::Social),
    ("rumor", "Rumeurs", SymbolCategory::Social),
    ("online", "Harcèlement en ligne", SymbolCategory::Cyber),
    ("photo", "Photo partagée", SymbolCategory::Cyber),
];

const LOCATIONS: &[(&str, &str, &str)] = &[
    ("classroom", "Salle de classe", "🏫"),
    ("playground", "Cour de récréation", "🏃"),
    ("cafeteria", "Cantine", "🍽️"),
    ("hallway", "Couloir", "🚪"),
    ("bathroom", "Toilettes", "🚻"),
    ("bus", "Bus scolaire", "🚌"),
    ("online", "En ligne", "💻"),
];

/// All symbols, in display order.
#[must_use]
pub fn list_symbols() -> Vec<Symbol> {
    SYMBOLS
        .iter()
        .map(|&(id, label, category)| Symbol {
            id: id.to_string(),
            label: label.to_string(),
            category,
        })
        .collect()
}

/// All locations, in display order.
#[must_use]
pub fn list_locations() -> Vec<Location> {
    LOCATIONS
        .iter()
        .map(|&(id, name, icon)| Location {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
        })
        .collect()
}
