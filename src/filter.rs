//! Scope filtering for roster and match listings.
//!
//! Listings are scoped by two dimensions, age-group and club. A dimension
//! filter either names a concrete value or is the wildcard `"Todos"`, which
//! the backend uses for users with visibility over everything.

use crate::domain::{Game, Player};

/// Sentinel filter value matching any value of a dimension.
pub const SCOPE_ANY: &str = "Todos";

/// Items carrying the two scoping dimensions.
pub trait Scoped {
    fn age_group(&self) -> &str;
    fn club(&self) -> &str;
}

impl Scoped for Player {
    fn age_group(&self) -> &str {
        &self.age_group
    }
    fn club(&self) -> &str {
        &self.club
    }
}

impl Scoped for Game {
    fn age_group(&self) -> &str {
        &self.age_group
    }
    fn club(&self) -> &str {
        &self.club
    }
}

/// A filter over age-group and club. Dimensions are ANDed together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeFilter {
    pub age_group: String,
    pub club: String,
}

impl ScopeFilter {
    pub fn new(age_group: impl Into<String>, club: impl Into<String>) -> Self {
        ScopeFilter {
            age_group: age_group.into(),
            club: club.into(),
        }
    }

    /// A filter that matches everything.
    #[allow(dead_code)]
    pub fn any() -> Self {
        ScopeFilter::new(SCOPE_ANY, SCOPE_ANY)
    }

    pub fn matches<T: Scoped>(&self, item: &T) -> bool {
        dimension_matches(&self.age_group, item.age_group())
            && dimension_matches(&self.club, item.club())
    }
}

fn dimension_matches(filter: &str, value: &str) -> bool {
    filter == SCOPE_ANY || filter == value
}

/// Keep the items matching `filter`, preserving input order.
pub fn filter_by_scope<T: Scoped + Clone>(items: &[T], filter: &ScopeFilter) -> Vec<T> {
    items
        .iter()
        .filter(|item| filter.matches(*item))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Player, Position};

    fn player(id: i64, age_group: &str, club: &str) -> Player {
        Player {
            id,
            name: format!("Player {}", id),
            number: id as u32,
            position: Position::Winger,
            age_group: age_group.into(),
            club: club.into(),
            photo: None,
            goals: 0,
            assists: 0,
            minutes_played: 0,
            matches_played: 0,
            yellow_cards: 0,
            red_cards: 0,
        }
    }

    #[test]
    fn test_exact_match_both_dimensions() {
        let players = vec![
            player(1, "U12", "A"),
            player(2, "U12", "B"),
            player(3, "U14", "A"),
        ];
        let kept = filter_by_scope(&players, &ScopeFilter::new("U12", "A"));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, 1);
    }

    #[test]
    fn test_wildcard_matches_any_value() {
        let players = vec![player(1, "U12", "A"), player(2, "U14", "A")];
        let kept = filter_by_scope(&players, &ScopeFilter::new(SCOPE_ANY, "A"));
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_double_wildcard_keeps_everything() {
        let players = vec![player(1, "U12", "A"), player(2, "U14", "B")];
        assert_eq!(filter_by_scope(&players, &ScopeFilter::any()).len(), 2);
    }

    #[test]
    fn test_input_order_preserved() {
        let players = vec![
            player(3, "U12", "A"),
            player(1, "U12", "A"),
            player(2, "U12", "A"),
        ];
        let kept = filter_by_scope(&players, &ScopeFilter::new("U12", "A"));
        let ids: Vec<i64> = kept.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_dimensions_are_anded() {
        let players = vec![player(1, "U12", "B")];
        // Age-group matches, club does not
        assert!(filter_by_scope(&players, &ScopeFilter::new("U12", "A")).is_empty());
    }
}
