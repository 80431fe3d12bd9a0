//! Filter allocated subnets by their 1-based position.

use crate::error::{RangeProblem, VlsmError};
use crate::models::AllocatedSubnet;

/// Subnets whose position lies in `start..=end`. `end` defaults to `start`.
///
/// Subnets without a position (VLSM results) never match.
pub fn search_range(
    subnets: &[AllocatedSubnet],
    start: i64,
    end: Option<i64>,
) -> Result<Vec<AllocatedSubnet>, VlsmError> {
    let end = end.unwrap_or(start);
    let count = subnets.len();
    let invalid = |problem| VlsmError::SearchRangeInvalid { start, end, problem };

    if start < 1 || end < 1 {
        return Err(invalid(RangeProblem::NonPositive));
    }
    if start as u64 > count as u64 || end as u64 > count as u64 {
        return Err(invalid(RangeProblem::OutOfBounds { count }));
    }
    if start > end {
        return Err(invalid(RangeProblem::Inverted));
    }

    Ok(subnets
        .iter()
        .filter(|s| {
            let position = s.position.unwrap_or(0) as i64;
            position >= start && position <= end
        })
        .cloned()
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::allocate_equal;
    use std::net::Ipv4Addr;

    fn eight() -> Vec<AllocatedSubnet> {
        allocate_equal(Ipv4Addr::new(10, 0, 0, 0), 24, 8, 3)
    }

    #[test]
    fn test_search_range() {
        let found = search_range(&eight(), 3, Some(5)).unwrap();
        let positions: Vec<u32> = found.iter().filter_map(|s| s.position).collect();
        assert_eq!(positions, vec![3, 4, 5]);
        assert_eq!(found[0].cidr().to_string(), "10.0.0.64/27");
    }

    #[test]
    fn test_search_single() {
        let found = search_range(&eight(), 8, None).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Subnet 8");
    }

    #[test]
    fn test_search_errors() {
        let subnets = eight();
        assert!(matches!(
            search_range(&subnets, 0, Some(2)),
            Err(VlsmError::SearchRangeInvalid {
                problem: RangeProblem::NonPositive,
                ..
            })
        ));
        assert!(matches!(
            search_range(&subnets, 2, Some(9)),
            Err(VlsmError::SearchRangeInvalid {
                problem: RangeProblem::OutOfBounds { count: 8 },
                ..
            })
        ));
        assert!(matches!(
            search_range(&subnets, 5, Some(2)),
            Err(VlsmError::SearchRangeInvalid {
                problem: RangeProblem::Inverted,
                ..
            })
        ));
    }
}
