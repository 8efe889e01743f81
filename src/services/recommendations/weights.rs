//! Fixed algorithm parameters. These are part of the ranking model, not runtime
//! configuration.

/// Share of the combined similarity taken from purchase overlap
pub const PURCHASE_WEIGHT: f64 = 0.50;

/// Share of the combined similarity taken from like overlap
pub const LIKE_WEIGHT: f64 = 0.35;

/// Share of the combined similarity taken from view overlap
pub const VIEW_WEIGHT: f64 = 0.15;

/// Multiplier applied to a neighbor's similarity for each product they purchased
pub const PURCHASE_BOOST: f64 = 3.0;

/// Multiplier applied to a neighbor's similarity for each product they liked
pub const LIKE_BOOST: f64 = 1.5;

/// Neighbors scoring below this are discarded outright
pub const MIN_SIMILARITY: f64 = 0.1;

/// Size of the neighborhood used to source candidates
pub const NEIGHBOR_LIMIT: usize = 10;

pub const DEFAULT_LIMIT: usize = 10;
pub const MAX_LIMIT: usize = 50;

/// Coerces a caller-supplied limit into `1..=MAX_LIMIT`
///
/// Missing, non-positive and oversized values all fall back to `DEFAULT_LIMIT`.
pub fn clamp_limit(limit: Option<i64>) -> usize {
    match limit {
        Some(n) if n > 0 && n <= MAX_LIMIT as i64 => n as usize,
        _ => DEFAULT_LIMIT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_limit_keeps_valid_values() {
        assert_eq!(clamp_limit(Some(1)), 1);
        assert_eq!(clamp_limit(Some(25)), 25);
        assert_eq!(clamp_limit(Some(50)), 50);
    }

    #[test]
    fn test_clamp_limit_defaults_out_of_range() {
        assert_eq!(clamp_limit(None), DEFAULT_LIMIT);
        assert_eq!(clamp_limit(Some(0)), DEFAULT_LIMIT);
        assert_eq!(clamp_limit(Some(-3)), DEFAULT_LIMIT);
        assert_eq!(clamp_limit(Some(51)), DEFAULT_LIMIT);
        assert_eq!(clamp_limit(Some(i64::MAX)), DEFAULT_LIMIT);
    }

    #[test]
    fn test_purchase_boost_is_twice_like_boost() {
        assert_eq!(PURCHASE_BOOST, 2.0 * LIKE_BOOST);
    }
}
