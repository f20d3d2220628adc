use serde::{Deserialize, Serialize};

/// Columns of `cash_card` a caller may order by.
/// Resolving names through this enum keeps client text out of generated SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortProperty {
    Id,
    Amount,
    Owner,
}

impl SortProperty {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "id" => Some(SortProperty::Id),
            "amount" => Some(SortProperty::Amount),
            "owner" => Some(SortProperty::Owner),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            SortProperty::Id => "id",
            SortProperty::Amount => "amount",
            SortProperty::Owner => "owner",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("asc") {
            Some(SortDirection::Asc)
        } else if name.eq_ignore_ascii_case("desc") {
            Some(SortDirection::Desc)
        } else {
            None
        }
    }

    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub property: SortProperty,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn asc(property: SortProperty) -> Self {
        Self { property, direction: SortDirection::Asc }
    }

    pub fn desc(property: SortProperty) -> Self {
        Self { property, direction: SortDirection::Desc }
    }
}

/// Page-size bounds applied when reading `page`/`size` from a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingDefaults {
    pub default_size: u32,
    pub max_size: u32,
}

impl Default for PagingDefaults {
    fn default() -> Self {
        Self {
            default_size: 20,
            max_size: 2000,
        }
    }
}

/// A zero-based page of an owner's records, with the ordering to apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: Vec<SortOrder>,
}

impl PageRequest {
    pub fn new(page: u32, size: u32, sort: Vec<SortOrder>) -> Self {
        Self { page, size, sort }
    }

    /// Rows to skip before this page starts
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}
