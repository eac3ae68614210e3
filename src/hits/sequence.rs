//! Flat hit cursor over a page sequence

use crate::error::{Error, Result};
use crate::page::HitsPath;
use crate::pagination::PageSequence;
use crate::types::Hit;
use std::iter::FusedIterator;
use tracing::trace;

/// Flat, forward-only, restartable cursor over the hits of consecutive pages.
///
/// A new sequence is not positioned. [`HitSequence::restart`] must run before
/// anything is read; [`HitSequence::current`] returns `None` until then and
/// again once the pages are exhausted.
///
/// ```
/// use hitscroll::{HitSequence, VecPages};
/// use serde_json::json;
///
/// let pages = VecPages::from_values(vec![
///     json!({"hits": {"hits": []}}),
///     json!({"hits": {"hits": ["a", "b"]}}),
///     json!({"hits": {"hits": ["c"]}}),
/// ]);
/// let mut hits = HitSequence::new(pages);
///
/// hits.restart()?;
/// let mut seen = Vec::new();
/// while let Some(hit) = hits.current() {
///     seen.push((hits.position(), hit.clone()));
///     hits.advance()?;
/// }
/// assert_eq!(seen, vec![(0, json!("a")), (1, json!("b")), (2, json!("c"))]);
/// # Ok::<(), hitscroll::Error>(())
/// ```
#[derive(Debug)]
pub struct HitSequence<P> {
    pages: P,
    hits_path: HitsPath,
    /// Hits yielded since the last restart, spanning pages
    global_position: u64,
    /// Index of `current_hit` within the current page
    local_index: usize,
    current_hit: Option<Hit>,
    positioned: bool,
}

impl<P: PageSequence> HitSequence<P> {
    /// Wrap a page sequence, reading hits from the path the pages already
    /// use, or `hits.hits` when they have none
    pub fn new(pages: P) -> Self {
        let hits_path = pages.hits_path().cloned().unwrap_or_default();
        Self::build(pages, hits_path)
    }

    /// Wrap a page sequence, reading hits from a custom path.
    ///
    /// The path is handed to the page sequence too, so both agree on where
    /// hits live.
    pub fn with_hits_path(mut pages: P, hits_path: HitsPath) -> Self {
        pages.set_hits_path(&hits_path);
        Self::build(pages, hits_path)
    }

    fn build(pages: P, hits_path: HitsPath) -> Self {
        Self {
            pages,
            hits_path,
            global_position: 0,
            local_index: 0,
            current_hit: None,
            positioned: false,
        }
    }

    /// Rewind to the first hit.
    ///
    /// Restarts the page sequence. A leading page without hits is skipped
    /// once, so a result set whose first batch is empty still starts at the
    /// first hit of the second page.
    pub fn restart(&mut self) -> Result<()> {
        self.global_position = 0;
        self.current_hit = None;
        self.positioned = false;

        self.pages.restart()?;

        let leading_empty = match self.pages.current_page() {
            Some(page) => page.hits(&self.hits_path)?.is_empty(),
            None => false,
        };
        if leading_empty {
            trace!("Skipping empty leading page");
            self.pages.advance_to_next_page()?;
        }

        self.load_page()?;
        self.positioned = true;
        Ok(())
    }

    /// Move to the next hit, fetching the next page when the current one
    /// runs out. Once exhausted this is a no-op.
    pub fn advance(&mut self) -> Result<()> {
        if !self.positioned {
            return Err(Error::NotPositioned);
        }
        if self.current_hit.is_none() {
            return Ok(());
        }

        self.global_position += 1;
        self.local_index += 1;

        let next = match self.pages.current_page() {
            Some(page) => page.hits(&self.hits_path)?.get(self.local_index).cloned(),
            None => None,
        };

        match next {
            Some(hit) => self.current_hit = Some(hit),
            None => {
                // Cleared first so a failed fetch leaves the cursor exhausted
                self.current_hit = None;
                trace!(position = self.global_position, "Page exhausted");
                self.pages.advance_to_next_page()?;
                self.load_page()?;
            }
        }
        Ok(())
    }

    /// True iff a hit is available
    pub fn has_current(&self) -> bool {
        self.current_hit.is_some()
    }

    /// The current hit, `None` before restart or once exhausted
    pub fn current(&self) -> Option<&Hit> {
        self.current_hit.as_ref()
    }

    /// 0-based index of the current hit across all pages of this traversal.
    ///
    /// After the advance that exhausts the sequence this equals the number
    /// of hits visited, and further advances leave it unchanged.
    pub fn position(&self) -> u64 {
        self.global_position
    }

    /// Whether `restart` has completed since construction
    pub fn is_positioned(&self) -> bool {
        self.positioned
    }

    /// Path the hits are read from
    pub fn hits_path(&self) -> &HitsPath {
        &self.hits_path
    }

    /// The underlying page sequence
    pub fn pages(&self) -> &P {
        &self.pages
    }

    /// Mutable access to the underlying page sequence.
    ///
    /// Moving the page cursor directly desynchronizes this sequence until the
    /// next restart.
    pub fn pages_mut(&mut self) -> &mut P {
        &mut self.pages
    }

    /// Unwrap the page sequence
    pub fn into_inner(self) -> P {
        self.pages
    }

    /// Iterate `(position, hit)` pairs from the start.
    ///
    /// The first call to `next` restarts the sequence.
    pub fn hits(&mut self) -> Hits<'_, P> {
        Hits {
            sequence: self,
            started: false,
            done: false,
        }
    }

    fn load_page(&mut self) -> Result<()> {
        match self.pages.current_page() {
            Some(page) => {
                self.local_index = 0;
                self.current_hit = page.hits(&self.hits_path)?.first().cloned();
            }
            None => self.current_hit = None,
        }
        Ok(())
    }
}

/// Iterator over `(position, hit)` pairs of a [`HitSequence`].
///
/// Yields each fetch or page error once, then stops.
#[derive(Debug)]
pub struct Hits<'a, P> {
    sequence: &'a mut HitSequence<P>,
    started: bool,
    done: bool,
}

impl<P: PageSequence> Iterator for Hits<'_, P> {
    type Item = Result<(u64, Hit)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let step = if self.started {
            self.sequence.advance()
        } else {
            self.started = true;
            self.sequence.restart()
        };
        if let Err(e) = step {
            self.done = true;
            return Some(Err(e));
        }

        match self.sequence.current() {
            Some(hit) => Some(Ok((self.sequence.position(), hit.clone()))),
            None => {
                self.done = true;
                None
            }
        }
    }
}

impl<P: PageSequence> FusedIterator for Hits<'_, P> {}

impl<'a, P: PageSequence> IntoIterator for &'a mut HitSequence<P> {
    type Item = Result<(u64, Hit)>;
    type IntoIter = Hits<'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.hits()
    }
}
