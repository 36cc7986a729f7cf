//! Advisory for a divergence quadrant

use crate::types::Recommendation;

/// Map `(ahead, behind)` to its recommendation. Total over all pairs.
pub const fn recommend(ahead: usize, behind: usize) -> Recommendation {
    match (ahead > 0, behind > 0) {
        (true, true) => Recommendation::Synchronize,
        (true, false) => Recommendation::Push,
        (false, true) => Recommendation::Pull,
        (false, false) => Recommendation::InSync,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quadrants() {
        assert_eq!(recommend(2, 5), Recommendation::Synchronize);
        assert_eq!(recommend(3, 0), Recommendation::Push);
        assert_eq!(recommend(0, 1), Recommendation::Pull);
        assert_eq!(recommend(0, 0), Recommendation::InSync);
    }

    #[test]
    fn test_messages() {
        insta::assert_snapshot!(
            [(1, 1), (1, 0), (0, 1), (0, 0)]
                .iter()
                .map(|&(a, b)| recommend(a, b).to_string())
                .collect::<Vec<_>>()
                .join("\n"),
            @r"
        synchronize: diverged in both directions
        push: local commits not yet shared
        pull: remote has newer commits
        in sync
        "
        );
    }

    #[test]
    fn test_only_sign_matters() {
        for (a, b) in [(1, 1), (1, 1000), (usize::MAX, 7)] {
            assert_eq!(recommend(a, b), Recommendation::Synchronize);
        }
        assert_eq!(recommend(usize::MAX, 0), Recommendation::Push);
        assert_eq!(recommend(0, usize::MAX), Recommendation::Pull);
    }
}
