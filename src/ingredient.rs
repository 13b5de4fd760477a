use crate::units::canonical_unit;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Structured form of one free-text ingredient line.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParsedIngredient {
    /// Amount, `None` when the line gives none ("salt to taste")
    pub quantity: Option<f64>,
    /// Canonical unit, `None` if no recognized unit followed the amount
    pub unit: Option<String>,
    /// Remaining free text
    pub name: String,
}

/// Denominators tried when rendering a quantity as a fraction
const DISPLAY_DENOMINATORS: [u64; 5] = [1, 2, 3, 4, 8];
const DISPLAY_TOLERANCE: f64 = 0.01;
/// Above this, `quantity * den` no longer converts to `u64` exactly
const MAX_FRACTION_QUANTITY: f64 = 1e15;

/// Parse one ingredient line into quantity, unit and name.
///
/// Parsing never fails. Input that does not start with an amount or a unit
/// ends up entirely in `name`.
///
/// ```
/// use recipe_planner::ingredient::parse;
///
/// let parsed = parse("1 1/2 cups plain flour");
/// assert_eq!(parsed.quantity, Some(1.5));
/// assert_eq!(parsed.unit.as_deref(), Some("cup"));
/// assert_eq!(parsed.name, "plain flour");
/// ```
pub fn parse(line: &str) -> ParsedIngredient {
    let cleaned = strip_parentheticals(line);
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();
    let mut rest = tokens.as_slice();

    let mut quantity = None;
    let mut unit = None;

    if let Some(leading) = leading_quantity(rest) {
        quantity = Some(leading.value);
        unit = leading.attached_unit.map(str::to_string);
        rest = &rest[leading.consumed..];
    }

    if unit.is_none() {
        if let Some(canonical) = rest.first().and_then(|token| canonical_unit(token)) {
            // Without an amount, a unit word only counts as a unit when it
            // leads into a name: "pinch of salt", but not "Cloves".
            if quantity.is_some() || unit_leads_into_name(rest) {
                unit = Some(canonical.to_string());
                rest = &rest[1..];
            }
        }
    }

    rest = skip_connector(rest);

    ParsedIngredient {
        quantity,
        unit,
        name: rest.join(" "),
    }
}

/// Drop the connector in "2 cups of flour"
fn skip_connector<'a, 'b>(tokens: &'a [&'b str]) -> &'a [&'b str] {
    match tokens.first() {
        Some(token) if token.eq_ignore_ascii_case("of") => &tokens[1..],
        _ => tokens,
    }
}

fn unit_leads_into_name(tokens: &[&str]) -> bool {
    let Some(unit) = tokens.first() else {
        return false;
    };
    !unit.ends_with(',') && !skip_connector(&tokens[1..]).is_empty()
}

impl ParsedIngredient {
    /// Returns a copy with the quantity multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            quantity: self.quantity.map(|q| q * factor),
            ..self.clone()
        }
    }
}

impl fmt::Display for ParsedIngredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(3);
        if let Some(quantity) = self.quantity {
            parts.push(format_quantity(quantity));
        }
        if let Some(unit) = &self.unit {
            parts.push(unit.clone());
        }
        if !self.name.is_empty() {
            parts.push(self.name.clone());
        }
        write!(f, "{}", parts.join(" "))
    }
}

/// Render a quantity for display, preferring kitchen fractions.
///
/// `1.5` becomes `"1 1/2"`, `0.3333` becomes `"1/3"`. Values that are not
/// close to a half, third, quarter or eighth fall back to at most two
/// decimal places.
pub fn format_quantity(quantity: f64) -> String {
    if !quantity.is_finite() {
        return quantity.to_string();
    }
    if quantity < 0.0 {
        return format!("-{}", format_quantity(-quantity));
    }

    let denominators: &[u64] = if quantity < MAX_FRACTION_QUANTITY {
        &DISPLAY_DENOMINATORS
    } else {
        &[]
    };
    for &den in denominators {
        let num = (quantity * den as f64).round();
        if (quantity - num / den as f64).abs() < DISPLAY_TOLERANCE {
            let num = num as u64;
            let whole = num / den;
            let rem = num % den;
            return match (whole, rem) {
                (whole, 0) => whole.to_string(),
                (0, rem) => format!("{}/{}", rem, den),
                (whole, rem) => format!("{} {}/{}", whole, rem, den),
            };
        }
    }

    let decimal = format!("{:.2}", quantity);
    decimal
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

struct LeadingQuantity {
    value: f64,
    consumed: usize,
    attached_unit: Option<&'static str>,
}

fn leading_quantity(tokens: &[&str]) -> Option<LeadingQuantity> {
    let first = tokens.first()?;

    if let Some(value) = parse_amount(first) {
        // Mixed number spread over two tokens: "1 1/2", "2 ½"
        if is_integer(first) {
            if let Some(fraction) = tokens.get(1).and_then(|t| parse_proper_fraction(t)) {
                return Some(LeadingQuantity {
                    value: value + fraction,
                    consumed: 2,
                    attached_unit: None,
                });
            }
        }
        return Some(LeadingQuantity {
            value,
            consumed: 1,
            attached_unit: None,
        });
    }

    // Amount glued to its unit: "200g", "1.5kg"
    let split = first
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '/'))
        .filter(|&idx| idx > 0)?;
    let (amount, suffix) = first.split_at(split);
    let value = parse_amount(amount)?;
    let unit = canonical_unit(suffix)?;
    Some(LeadingQuantity {
        value,
        consumed: 1,
        attached_unit: Some(unit),
    })
}

/// A single-token amount: `2`, `0.5`, `1/2`, `1-1/2`, `½`, `1½`.
fn parse_amount(token: &str) -> Option<f64> {
    parse_decimal(token)
        .or_else(|| parse_fraction(token))
        .or_else(|| parse_vulgar(token))
        .or_else(|| parse_hyphenated_mixed(token))
        .filter(|value| value.is_finite())
}

fn is_integer(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

fn parse_decimal(token: &str) -> Option<f64> {
    let digits = token.chars().filter(|c| c.is_ascii_digit()).count();
    let dots = token.chars().filter(|&c| c == '.').count();
    if digits == 0 || dots > 1 || digits + dots != token.chars().count() {
        return None;
    }
    token.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn parse_fraction(token: &str) -> Option<f64> {
    let (num, den) = token.split_once('/')?;
    if !is_integer(num) || !is_integer(den) {
        return None;
    }
    let num: f64 = num.parse().ok()?;
    let den: f64 = den.parse().ok()?;
    if den == 0.0 {
        return None;
    }
    Some(num / den).filter(|value| value.is_finite())
}

/// Fraction that may follow a whole number in a mixed amount.
fn parse_proper_fraction(token: &str) -> Option<f64> {
    parse_fraction(token)
        .or_else(|| {
            let mut chars = token.chars();
            let only = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            vulgar_fraction(only)
        })
        .filter(|value| *value < 1.0)
}

fn parse_vulgar(token: &str) -> Option<f64> {
    let last = token.chars().last()?;
    let fraction = vulgar_fraction(last)?;
    let whole = &token[..token.len() - last.len_utf8()];
    if whole.is_empty() {
        return Some(fraction);
    }
    if !is_integer(whole) {
        return None;
    }
    whole.parse::<f64>().ok().map(|w| w + fraction)
}

fn parse_hyphenated_mixed(token: &str) -> Option<f64> {
    let (whole, fraction) = token.split_once('-')?;
    if !is_integer(whole) {
        return None;
    }
    let fraction = parse_fraction(fraction).filter(|f| *f < 1.0)?;
    whole.parse::<f64>().ok().map(|w| w + fraction)
}

fn vulgar_fraction(c: char) -> Option<f64> {
    let value = match c {
        '½' => 1.0 / 2.0,
        '⅓' => 1.0 / 3.0,
        '⅔' => 2.0 / 3.0,
        '¼' => 1.0 / 4.0,
        '¾' => 3.0 / 4.0,
        '⅕' => 1.0 / 5.0,
        '⅖' => 2.0 / 5.0,
        '⅗' => 3.0 / 5.0,
        '⅘' => 4.0 / 5.0,
        '⅙' => 1.0 / 6.0,
        '⅚' => 5.0 / 6.0,
        '⅛' => 1.0 / 8.0,
        '⅜' => 3.0 / 8.0,
        '⅝' => 5.0 / 8.0,
        '⅞' => 7.0 / 8.0,
        _ => return None,
    };
    Some(value)
}

/// Remove `( ... )` asides. An unclosed `(` drops the rest of the line.
fn strip_parentheticals(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut depth = 0usize;
    for c in line.chars() {
        match c {
            '(' => {
                depth += 1;
                out.push(' ');
            }
            ')' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}
