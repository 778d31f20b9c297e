use seatline_core::{CoreError, CoreResult};
use seatline_shared::Route;
use std::collections::HashSet;

/// The immutable fare table: routes, the section names every route shares,
/// and the per-section seat count.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    sections: Vec<String>,
    seat_count: u32,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>, sections: Vec<String>, seat_count: u32) -> Result<Self, TableError> {
        if routes.is_empty() {
            return Err(TableError::NoRoutes);
        }
        if sections.is_empty() {
            return Err(TableError::NoSections);
        }
        let mut seen = HashSet::new();
        for section in &sections {
            if section.trim().is_empty() {
                return Err(TableError::BlankSection);
            }
            if !seen.insert(section.as_str()) {
                return Err(TableError::DuplicateSection(section.clone()));
            }
        }
        if seat_count == 0 {
            return Err(TableError::NoSeats);
        }

        Ok(Self {
            routes,
            sections,
            seat_count,
        })
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn route(&self, index: usize) -> Option<&Route> {
        self.routes.get(index)
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    pub fn section_name(&self, index: usize) -> Option<&str> {
        self.sections.get(index).map(String::as_str)
    }

    pub fn section_index(&self, name: &str) -> Option<usize> {
        self.sections.iter().position(|s| s == name)
    }

    pub fn seat_count(&self) -> u32 {
        self.seat_count
    }

    /// Resolves a purchase against the fare table.
    ///
    /// Only the first route connecting `origin` to `destination` is
    /// considered; a later duplicate with a lower fare is never used.
    pub fn resolve(&self, origin: &str, destination: &str, offered: u32) -> CoreResult<usize> {
        let (index, route) = self
            .routes
            .iter()
            .enumerate()
            .find(|(_, route)| route.connects(origin, destination))
            .ok_or(CoreError::RouteNotFound)?;

        if !route.is_covered_by(offered) {
            return Err(CoreError::InsufficientPayment {
                price: route.price,
                offered,
            });
        }
        Ok(index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("at least one route is required")]
    NoRoutes,
    #[error("at least one section is required")]
    NoSections,
    #[error("section names must not be blank")]
    BlankSection,
    #[error("duplicate section: {0}")]
    DuplicateSection(String),
    #[error("seat count must be greater than zero")]
    NoSeats,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RouteTable {
        RouteTable::new(
            vec![Route::new("London", "Paris", 20), Route::new("Osaka", "London", 200)],
            vec!["A".into(), "B".into()],
            5,
        )
        .unwrap()
    }

    #[test]
    fn test_resolve_route() {
        let table = table();
        assert_eq!(table.resolve("London", "Paris", 20), Ok(0));
        assert_eq!(table.resolve("Osaka", "London", 500), Ok(1));
    }

    #[test]
    fn test_resolve_insufficient_payment() {
        assert_eq!(
            table().resolve("London", "Paris", 10),
            Err(CoreError::InsufficientPayment { price: 20, offered: 10 })
        );
    }

    #[test]
    fn test_resolve_unknown_route() {
        assert_eq!(table().resolve("Paris", "London", 1000), Err(CoreError::RouteNotFound));
    }

    #[test]
    fn test_first_matching_route_wins() {
        let table = RouteTable::new(
            vec![Route::new("London", "Paris", 50), Route::new("London", "Paris", 5)],
            vec!["A".into()],
            1,
        )
        .unwrap();
        assert_eq!(
            table.resolve("London", "Paris", 10),
            Err(CoreError::InsufficientPayment { price: 50, offered: 10 })
        );
    }

    #[test]
    fn test_sections_lookup() {
        let table = table();
        assert_eq!(table.section_index("B"), Some(1));
        assert_eq!(table.section_index("C"), None);
        assert_eq!(table.section_name(0), Some("A"));
        assert_eq!(table.seat_count(), 5);
    }

    #[test]
    fn test_invalid_tables() {
        let routes = vec![Route::new("London", "Paris", 20)];
        assert_eq!(RouteTable::new(vec![], vec!["A".into()], 1).unwrap_err(), TableError::NoRoutes);
        assert_eq!(RouteTable::new(routes.clone(), vec![], 1).unwrap_err(), TableError::NoSections);
        assert_eq!(
            RouteTable::new(routes.clone(), vec!["A".into(), "A".into()], 1).unwrap_err(),
            TableError::DuplicateSection("A".into())
        );
        assert_eq!(RouteTable::new(routes, vec!["A".into()], 0).unwrap_err(), TableError::NoSeats);
    }
}
