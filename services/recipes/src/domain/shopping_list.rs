//! Shopping-list aggregation.
//!
//! Every ingredient line of every recipe in a user's cart is folded into one
//! line per ingredient, then rendered as a plain-text download.

use std::collections::HashMap;
use std::fmt;

/// One ingredient line of one recipe in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartIngredient {
    pub ingredient_id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

/// Summed amount for a single ingredient across the whole cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShoppingListLine {
    pub ingredient_id: i32,
    pub name: String,
    pub measurement_unit: String,
    pub total: i64,
}

impl fmt::Display for ShoppingListLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {}", self.name, self.total, self.measurement_unit)
    }
}

/// Groups rows by ingredient id and sums their amounts.
///
/// The result is ordered by name (ordinal, case-sensitive), then unit, then id,
/// so ingredients sharing a name but not a unit stay separate and ordered.
pub fn aggregate<I>(rows: I) -> Vec<ShoppingListLine>
where
    I: IntoIterator<Item = CartIngredient>,
{
    let mut groups: HashMap<i32, ShoppingListLine> = HashMap::new();
    for row in rows {
        match groups.get_mut(&row.ingredient_id) {
            Some(line) => line.total += i64::from(row.amount),
            None => {
                groups.insert(
                    row.ingredient_id,
                    ShoppingListLine {
                        ingredient_id: row.ingredient_id,
                        name: row.name,
                        measurement_unit: row.measurement_unit,
                        total: i64::from(row.amount),
                    },
                );
            }
        }
    }

    let mut lines: Vec<ShoppingListLine> = groups.into_values().collect();
    lines.sort_by(|a, b| {
        a.name
            .cmp(&b.name)
            .then_with(|| a.measurement_unit.cmp(&b.measurement_unit))
            .then(a.ingredient_id.cmp(&b.ingredient_id))
    });
    lines
}

/// Renders `<name>: <total> <unit>` lines, each terminated by `\n`.
pub fn render(lines: &[ShoppingListLine]) -> String {
    lines.iter().map(|line| format!("{line}\n")).collect()
}
