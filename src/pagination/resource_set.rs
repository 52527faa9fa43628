//! Auto-paging resource set
//!
//! [`ResourceSet`] is a lazy, forward-only sequence of records that crosses
//! server page boundaries as it is consumed. Only one page is held at a
//! time.

use super::reader::Reader;
use super::types::{Page, PagingState};
use crate::error::{Error, Result};
use crate::http::RestClient;
use futures::stream::{self, Stream};
use tracing::{debug, warn};

/// Records of a list operation, spanning any number of pages
pub struct ResourceSet<R: Reader> {
    reader: R,
    client: RestClient,
    page: Page<R::Record>,
    auto_paging: bool,
    pending_error: Option<Error>,
    aborted: bool,
}

impl<R: Reader> ResourceSet<R> {
    /// Wrap the first page of a list
    pub fn new(reader: R, client: RestClient, page: Page<R::Record>) -> Self {
        Self {
            reader,
            client,
            page,
            auto_paging: true,
            pending_error: None,
            aborted: false,
        }
    }

    pub fn is_auto_paging(&self) -> bool {
        self.auto_paging
    }

    /// Turn auto-paging on or off; applies at the next page boundary
    pub fn set_auto_paging(&mut self, auto_paging: bool) -> &mut Self {
        self.auto_paging = auto_paging;
        self
    }

    /// Page size of the buffered page, as reported by the server
    pub fn page_size(&self) -> u32 {
        self.page.page_size()
    }

    /// Change the page size the reader requests from now on.
    ///
    /// This does not change any page the set fetches while auto-paging:
    /// those follow server locators verbatim, and a locator already encodes
    /// its own size. The buffered page is unaffected too. Only requests the
    /// reader builds itself, such as a later `first_page`, use the new size.
    pub fn set_page_size(&mut self, size: u32) -> &mut Self {
        self.reader.set_page_size(size);
        self
    }

    /// The buffered page
    pub fn page(&self) -> &Page<R::Record> {
        &self.page
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn client(&self) -> &RestClient {
        &self.client
    }

    /// True iff the buffered page still has an unread record, or a paging
    /// failure is waiting to be reported.
    ///
    /// Never contacts the server. While auto-paging, every advance skips
    /// past empty pages that still carry a locator, so the answer is exact
    /// once the first record has been taken. It can be `false` while the
    /// server holds more records with auto-paging off, or before the first
    /// advance when the first page came back empty with a locator.
    pub fn has_more(&self) -> bool {
        !self.page.is_empty() || self.pending_error.is_some()
    }

    /// Current position in the paging state machine
    pub fn state(&self) -> PagingState {
        if self.aborted {
            PagingState::Aborted
        } else if !self.page.is_empty() {
            PagingState::Buffered
        } else if !self.page.has_next_page() {
            PagingState::Exhausted
        } else if self.auto_paging {
            PagingState::BoundaryAuto
        } else {
            PagingState::BoundaryManual
        }
    }

    /// Advance to the next record.
    ///
    /// When the record taken is the last one buffered and auto-paging is
    /// on, pages are fetched before this call returns until one has a
    /// record or there is no next page. If that fetch
    /// fails the record is still returned; the failure comes out of the
    /// following call as [`Error::Iteration`], after which the set yields
    /// nothing.
    pub async fn next(&mut self) -> Option<Result<R::Record>> {
        if let Some(err) = self.pending_error.take() {
            return Some(Err(Error::iteration(err)));
        }
        if self.aborted {
            return None;
        }

        // A boundary can be left open by an empty page that still has a
        // locator, or by auto-paging being switched back on.
        while self.state() == PagingState::BoundaryAuto {
            if let Err(err) = self.fetch_next_page().await {
                self.abort(&err);
                return Some(Err(Error::iteration(err)));
            }
        }

        let record = self.page.pop_record()?;

        while self.state() == PagingState::BoundaryAuto {
            if let Err(err) = self.fetch_next_page().await {
                self.abort(&err);
                self.pending_error = Some(err);
                break;
            }
        }

        Some(Ok(record))
    }

    /// Replace the buffered page with the one its locator points at
    async fn fetch_next_page(&mut self) -> Result<()> {
        debug!(
            "Fetching next page from {}",
            self.page.next_page_uri().unwrap_or_default()
        );
        self.page = match self.reader.next_page(&self.page, &self.client).await? {
            Some(page) => page,
            // reader found nothing behind the locator: treat as the last page
            None => Page::new(Vec::new(), self.page.page_size(), None),
        };
        Ok(())
    }

    fn abort(&mut self, err: &Error) {
        warn!("Paging aborted: {}", err);
        self.aborted = true;
    }

    /// Drain every remaining record, stopping at the first failure
    pub async fn collect_records(mut self) -> Result<Vec<R::Record>> {
        let mut records = Vec::new();
        while let Some(record) = self.next().await {
            records.push(record?);
        }
        Ok(records)
    }

    /// Adapt the set into a stream of records
    pub fn into_stream(self) -> impl Stream<Item = Result<R::Record>> {
        stream::unfold(self, |mut set| async move {
            let item = set.next().await?;
            Some((item, set))
        })
    }
}

impl<R> std::fmt::Debug for ResourceSet<R>
where
    R: Reader + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceSet")
            .field("reader", &self.reader)
            .field("state", &self.state())
            .field("buffered", &self.page.len())
            .field("auto_paging", &self.auto_paging)
            .finish_non_exhaustive()
    }
}
