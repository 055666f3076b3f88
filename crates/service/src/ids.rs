//! Prefixed sequential identifiers (`OP001`, `MT014`, `AR1000`, ...).
//!
//! Allocation reads the current maximum ID (`ORDER BY id DESC LIMIT 1`) and
//! increments the numeric tail; the pad width is three digits and the number
//! simply grows wider past 999. Allocation is not transactional.

pub const MENTOR_PREFIX: &str = "MT";
pub const OPPORTUNITY_PREFIX: &str = "OP";
pub const ARTICLE_PREFIX: &str = "AR";

/// Next ID after `last`; `None` (empty table) starts the sequence at 1.
/// An unparsable tail restarts the sequence rather than failing the insert.
pub fn next_id(prefix: &str, last: Option<&str>) -> String {
    let next = last
        .and_then(|id| id.get(prefix.len()..))
        .and_then(|digits| digits.parse::<u64>().ok())
        .map_or(1, |n| n + 1);
    format!("{prefix}{next:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_starts_at_one() {
        assert_eq!(next_id(OPPORTUNITY_PREFIX, None), "OP001");
        assert_eq!(next_id(MENTOR_PREFIX, None), "MT001");
    }

    #[test]
    fn increments_and_keeps_padding() {
        assert_eq!(next_id(OPPORTUNITY_PREFIX, Some("OP007")), "OP008");
        assert_eq!(next_id(ARTICLE_PREFIX, Some("AR099")), "AR100");
    }

    #[test]
    fn grows_past_three_digits() {
        assert_eq!(next_id(OPPORTUNITY_PREFIX, Some("OP999")), "OP1000");
        assert_eq!(next_id(OPPORTUNITY_PREFIX, Some("OP1000")), "OP1001");
    }

    #[test]
    fn unparsable_tail_restarts_sequence() {
        assert_eq!(next_id(OPPORTUNITY_PREFIX, Some("OPx")), "OP001");
        assert_eq!(next_id(OPPORTUNITY_PREFIX, Some("")), "OP001");
    }
}
