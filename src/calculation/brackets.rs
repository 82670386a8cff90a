//! The fixed progressive bracket table.
//!
//! The table is a compile-time constant; nothing in the crate can modify it.

use rust_decimal::Decimal;

use crate::models::Bracket;

/// Upper bound of the zero-rate bracket.
pub const TAX_FREE_THRESHOLD: Decimal = Decimal::from_parts(250000, 0, 0, false, 0);

/// The four progressive brackets, ordered ascending by lower bound.
///
/// Each lower bound sits one unit above the previous upper bound
/// (`250000` then `250001`, `500000` then `500001`, `1000000` then
/// `1000001`). The gap is carried over unchanged from the source table so
/// that every salary produces the same tax as it always has.
pub const TAX_BRACKETS: [Bracket; 4] = [
    Bracket {
        lower: Decimal::ZERO,
        upper: Some(TAX_FREE_THRESHOLD),
        rate: Decimal::from_parts(0, 0, 0, false, 2),
    },
    Bracket {
        lower: Decimal::from_parts(250001, 0, 0, false, 0),
        upper: Some(Decimal::from_parts(500000, 0, 0, false, 0)),
        rate: Decimal::from_parts(5, 0, 0, false, 2),
    },
    Bracket {
        lower: Decimal::from_parts(500001, 0, 0, false, 0),
        upper: Some(Decimal::from_parts(1000000, 0, 0, false, 0)),
        rate: Decimal::from_parts(20, 0, 0, false, 2),
    },
    Bracket {
        lower: Decimal::from_parts(1000001, 0, 0, false, 0),
        upper: None,
        rate: Decimal::from_parts(30, 0, 0, false, 2),
    },
];
