use crate::errors::ServiceError;

pub const CATEGORY_IDS_FORMAT: &str = "category_ids must be comma separated integers, e.g. 1,2,3";

/// Parse the `category_ids` form value.
///
/// `None` or a blank string yields `Ok(None)`. Whitespace around tokens is
/// tolerated; any other token fails the whole value.
///
/// ```
/// use service::catalog::category_ids::parse_category_ids;
/// assert_eq!(parse_category_ids(Some(" 1, 2 ")).unwrap(), Some(vec![1, 2]));
/// assert_eq!(parse_category_ids(Some("")).unwrap(), None);
/// assert!(parse_category_ids(Some("1,x")).is_err());
/// ```
pub fn parse_category_ids(raw: Option<&str>) -> Result<Option<Vec<i32>>, ServiceError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    raw.split(',')
        .map(|tok| tok.trim().parse::<i32>())
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
        .map_err(|_| ServiceError::InvalidInput(CATEGORY_IDS_FORMAT.into()))
}
