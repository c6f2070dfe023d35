use super::{ApiError, ListQuery};
use crate::config::CatalogConfig;
use crate::domain::{Filter, Paging};

pub fn validate_id(id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid ID: {id}. ID must be a positive integer"
        )));
    }
    Ok(id)
}

/// Resolves `page`/`limit` against the configured defaults.
///
/// A zero page is rejected; an oversized limit is capped.
pub fn paging(query: &ListQuery, config: &CatalogConfig) -> Result<Paging, ApiError> {
    let page = query.page.unwrap_or(1);
    if page == 0 {
        return Err(ApiError::validation("Page numbers start at 1"));
    }

    let limit = match query.limit {
        Some(0) => return Err(ApiError::validation("Limit must be at least 1")),
        Some(limit) => limit.min(config.max_page_limit),
        None => config.default_page_limit,
    };

    Ok(Paging::new(page, limit))
}

/// Builds a listing filter; a blank name means no name filter.
pub fn filter(query: ListQuery, config: &CatalogConfig) -> Result<Filter, ApiError> {
    let paging = paging(&query, config)?;
    let name = query
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty());

    Ok(Filter { name, paging })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<u64>, limit: Option<u64>) -> ListQuery {
        ListQuery {
            name: None,
            page,
            limit,
        }
    }

    #[test]
    fn test_validate_id() {
        assert!(validate_id(1).is_ok());
        assert!(validate_id(0).is_err());
        assert!(validate_id(-3).is_err());
    }

    #[test]
    fn test_paging_defaults_and_cap() {
        let config = CatalogConfig::default();

        assert_eq!(paging(&query(None, None), &config).unwrap(), Paging::new(1, 20));
        assert_eq!(
            paging(&query(Some(3), Some(500)), &config).unwrap(),
            Paging::new(3, 100)
        );
        assert!(paging(&query(Some(0), None), &config).is_err());
        assert!(paging(&query(None, Some(0)), &config).is_err());
    }

    #[test]
    fn test_blank_name_is_ignored() {
        let config = CatalogConfig::default();
        let q = ListQuery {
            name: Some("  ".to_string()),
            ..ListQuery::default()
        };
        assert_eq!(filter(q, &config).unwrap().name, None);
    }
}
