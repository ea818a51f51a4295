use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("no data in {table}")]
pub struct NoDataError {
    pub table: &'static str,
}

impl NoDataError {
    pub fn new(table: &'static str) -> Self {
        Self { table }
    }
}

pub fn is_no_data(err: &anyhow::Error) -> bool {
    err.downcast_ref::<NoDataError>().is_some()
}
