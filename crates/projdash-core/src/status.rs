//! Status badge classification

use crate::project::StatusVariant;

/// Visual treatment of a status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeTone {
    /// Green
    Positive,
    /// Yellow
    Caution,
    /// Red
    Negative,
    /// Default treatment for unrecognized variants
    Neutral,
}

/// Map a known variant to its badge tone
pub fn classify_variant(variant: StatusVariant) -> BadgeTone {
    match variant {
        StatusVariant::Active => BadgeTone::Positive,
        StatusVariant::InProgress => BadgeTone::Caution,
        StatusVariant::OnHold => BadgeTone::Negative,
    }
}

/// Map an optional variant to a badge tone, defaulting to `Neutral`
pub fn classify(variant: Option<StatusVariant>) -> BadgeTone {
    variant.map(classify_variant).unwrap_or(BadgeTone::Neutral)
}
