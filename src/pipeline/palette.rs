//! Fixed stage color palette and the deterministic name-to-color assigner.

pub const BLUE: &str = "#3B82F6";
pub const GREEN: &str = "#10B981";
pub const YELLOW: &str = "#F59E0B";
pub const RED: &str = "#EF4444";
pub const PURPLE: &str = "#8B5CF6";
pub const PINK: &str = "#EC4899";
pub const CYAN: &str = "#06B6D4";
pub const LIME: &str = "#84CC16";
pub const ORANGE: &str = "#F97316";
pub const INDIGO: &str = "#6366F1";

/// Teal sits outside the assignable palette; it is reserved for the `Hired`
/// default status.
pub const TEAL: &str = "#14B8A6";

/// Rendering fallback for status strings matching neither a stage nor the
/// default vocabulary.
pub const NEUTRAL_GRAY: &str = "#6B7280";

/// Ordered palette the assigner indexes into.
pub const PALETTE: [&str; 10] = [
    BLUE, GREEN, YELLOW, RED, PURPLE, PINK, CYAN, LIME, ORANGE, INDIGO,
];

/// Deterministic color for a stage name: sum of character codes modulo the
/// palette size. The empty string sums to zero and lands on the first entry.
pub fn color_for(name: &str) -> &'static str {
    let sum: u32 = name.chars().map(|ch| ch as u32).sum();
    PALETTE[(sum % PALETTE.len() as u32) as usize]
}
