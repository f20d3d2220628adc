use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::types::{PageRequest, PagingDefaults, SortOrder, SortProperty};

impl PageRequest {
    /// Build a page request from raw `page`, `size` and repeated `sort` query pairs.
    ///
    /// Unusable `page`/`size` values fall back to the defaults rather than failing;
    /// `size` is clamped to `defaults.max_size`. Without any sort, `amount` ascending applies.
    pub fn from_query_pairs(pairs: &[(String, String)], defaults: &PagingDefaults) -> Result<Self, FilterError> {
        let mut page = 0u32;
        let mut size = defaults.default_size;
        let mut sort_values = Vec::new();

        for (key, value) in pairs {
            match key.as_str() {
                "page" => page = value.trim().parse::<u32>().unwrap_or(0),
                "size" => {
                    size = match value.trim().parse::<u32>() {
                        Ok(0) | Err(_) => defaults.default_size,
                        Ok(n) => n.min(defaults.max_size),
                    }
                }
                "sort" => sort_values.push(value.as_str()),
                _ => {}
            }
        }

        let mut sort = FilterOrder::parse_sort_params(&sort_values)?;
        if sort.is_empty() {
            sort.push(SortOrder::asc(SortProperty::Amount));
        }

        Ok(PageRequest::new(page, size, sort))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn defaults_when_no_params() {
        let req = PageRequest::from_query_pairs(&[], &PagingDefaults::default()).unwrap();
        assert_eq!(req, PageRequest::new(0, 20, vec![SortOrder::asc(SortProperty::Amount)]));
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn reads_page_size_and_sort() {
        let req = PageRequest::from_query_pairs(
            &pairs(&[("page", "2"), ("size", "5"), ("sort", "amount,desc")]),
            &PagingDefaults::default(),
        )
        .unwrap();
        assert_eq!(req.page, 2);
        assert_eq!(req.size, 5);
        assert_eq!(req.sort, vec![SortOrder::desc(SortProperty::Amount)]);
        assert_eq!(req.offset(), 10);
    }

    #[test]
    fn bad_numbers_fall_back_and_size_is_clamped() {
        let defaults = PagingDefaults { default_size: 10, max_size: 50 };
        let req = PageRequest::from_query_pairs(&pairs(&[("page", "-1"), ("size", "0")]), &defaults).unwrap();
        assert_eq!((req.page, req.size), (0, 10));

        let req = PageRequest::from_query_pairs(&pairs(&[("page", "x"), ("size", "9999")]), &defaults).unwrap();
        assert_eq!((req.page, req.size), (0, 50));
    }

    #[test]
    fn unknown_sort_property_is_an_error() {
        let result = PageRequest::from_query_pairs(&pairs(&[("sort", "color")]), &PagingDefaults::default());
        assert_eq!(result, Err(FilterError::InvalidSortProperty("color".to_string())));
    }
}
