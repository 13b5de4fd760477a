//! Unit synonyms recognized by the ingredient parser.

/// Spelling → canonical unit. Lookups are case-insensitive.
const UNIT_ALIASES: &[(&str, &str)] = &[
    ("tablespoons", "tbsp"),
    ("tablespoon", "tbsp"),
    ("tbsps", "tbsp"),
    ("tbsp", "tbsp"),
    ("tbs", "tbsp"),
    ("tbl", "tbsp"),
    ("teaspoons", "tsp"),
    ("teaspoon", "tsp"),
    ("tsps", "tsp"),
    ("tsp", "tsp"),
    ("cups", "cup"),
    ("cup", "cup"),
    ("c", "cup"),
    ("ounces", "oz"),
    ("ounce", "oz"),
    ("oz", "oz"),
    ("pounds", "pound"),
    ("pound", "pound"),
    ("lbs", "pound"),
    ("lb", "pound"),
    ("kilograms", "kg"),
    ("kilogram", "kg"),
    ("kgs", "kg"),
    ("kg", "kg"),
    ("grams", "g"),
    ("gram", "g"),
    ("gr", "g"),
    ("g", "g"),
    ("milliliters", "ml"),
    ("milliliter", "ml"),
    ("millilitres", "ml"),
    ("millilitre", "ml"),
    ("ml", "ml"),
    ("liters", "l"),
    ("liter", "l"),
    ("litres", "l"),
    ("litre", "l"),
    ("l", "l"),
    ("pinches", "pinch"),
    ("pinch", "pinch"),
    ("cloves", "clove"),
    ("clove", "clove"),
    ("cans", "can"),
    ("can", "can"),
    ("packages", "package"),
    ("package", "package"),
    ("pkg", "package"),
    ("slices", "slice"),
    ("slice", "slice"),
];

/// Look up the canonical form of a unit token.
///
/// Matching ignores case and a trailing `.` or `,` (`"Tbsp."` → `"tbsp"`).
pub fn canonical_unit(token: &str) -> Option<&'static str> {
    let trimmed = token.trim_end_matches(['.', ',']);
    if trimmed.is_empty() {
        return None;
    }

    UNIT_ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(trimmed))
        .map(|(_, canonical)| *canonical)
}
