//! Route handlers organized by concern

pub mod health;
pub mod ingest;
pub mod status;
pub mod telemetry;

use crate::api::error::ApiError;
use crate::store::Category;

/// Parse a category path segment, mapping unknown names to 404
pub(crate) fn parse_category(segment: &str) -> Result<Category, ApiError> {
    segment
        .parse::<Category>()
        .map_err(|e| ApiError::NotFound(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category_known() {
        assert_eq!(parse_category("vessel").unwrap(), Category::Vessel);
        assert_eq!(parse_category("basestation").unwrap(), Category::BaseStation);
    }

    #[test]
    fn test_parse_category_unknown_is_not_found() {
        assert!(matches!(
            parse_category("submarine"),
            Err(ApiError::NotFound(_))
        ));
    }
}
