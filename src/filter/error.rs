use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid sort property: {0}")]
    InvalidSortProperty(String),
}
