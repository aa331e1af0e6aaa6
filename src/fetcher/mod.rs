pub mod http_fetcher;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::BirthPayload;

/// Looks up the births recorded for a day of the year.
///
/// Implementations never panic: a transport failure, an error status or an
/// unreadable body all come back as the `Err` arm. `month` and `day` are the
/// two-character request parameters and are passed through unvalidated.
#[async_trait]
pub trait BirthdayFetcher {
    async fn fetch(&self, month: &str, day: &str) -> Result<BirthPayload>;
}
