//! Page arithmetic for history listings.

/// Number of rows to skip for a 1-based `page`.
pub fn offset(page: u32, limit: u32) -> i64 {
    i64::from(page.saturating_sub(1)) * i64::from(limit)
}

/// Index of the last page, `ceil(total / limit)`. Zero when there is nothing to show.
pub fn last_page(total: i64, limit: u32) -> u32 {
    if total <= 0 || limit == 0 {
        return 0;
    }
    let limit = i64::from(limit);
    let pages = (total + limit - 1) / limit;
    u32::try_from(pages).unwrap_or(u32::MAX)
}
