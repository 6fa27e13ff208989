//! Fixed-size pagination for catalog listings.

use crate::errors::ServiceError;

/// Problems per page.
pub const PAGE_SIZE: u64 = 15;

/// 1-based page index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page(u64);

impl Page {
    /// Missing, zero and negative requests all mean the first page.
    pub fn from_request(page: Option<i64>) -> Self {
        match page {
            Some(p) if p > 1 => Page(p as u64),
            _ => Page(1),
        }
    }

    pub fn number(&self) -> u64 { self.0 }

    pub fn offset(&self) -> u64 { (self.0 - 1).saturating_mul(PAGE_SIZE) }

    /// A page whose first index lies beyond `total` does not exist.
    pub fn ensure_within(&self, total: u64) -> Result<(), ServiceError> {
        if self.offset() > total {
            return Err(ServiceError::NotFound(format!("page {} not found", self.0)));
        }
        Ok(())
    }
}

impl Default for Page {
    fn default() -> Self { Page(1) }
}
