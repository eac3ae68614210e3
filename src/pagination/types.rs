//! Page sequence abstraction
//!
//! Defines the narrow contract the hit cursor consumes from any paginator.

use crate::error::Result;
use crate::page::{HitsPath, Page};

/// A forward-only, restartable cursor over fetched pages.
///
/// Implementations own fetching. A fresh sequence sits before its first page
/// and holds nothing until [`PageSequence::restart`] is called.
pub trait PageSequence {
    /// Reset to the first page, fetching it if one exists.
    ///
    /// Calling this repeatedly must produce the same sequence each time.
    fn restart(&mut self) -> Result<()>;

    /// Move to the next page. Once exhausted, further calls are no-ops.
    fn advance_to_next_page(&mut self) -> Result<()>;

    /// True while a page is available at the cursor
    fn has_current_page(&self) -> bool;

    /// Page at the cursor, `None` when exhausted or not yet restarted
    fn current_page(&self) -> Option<&Page>;

    /// Hit path this sequence reads pages with, if it looks inside them
    fn hits_path(&self) -> Option<&HitsPath> {
        None
    }

    /// Adopt the hit path of the consumer. Sequences that never inspect
    /// hits ignore it.
    fn set_hits_path(&mut self, _path: &HitsPath) {}
}

impl<P: PageSequence + ?Sized> PageSequence for &mut P {
    fn restart(&mut self) -> Result<()> {
        (**self).restart()
    }

    fn advance_to_next_page(&mut self) -> Result<()> {
        (**self).advance_to_next_page()
    }

    fn has_current_page(&self) -> bool {
        (**self).has_current_page()
    }

    fn current_page(&self) -> Option<&Page> {
        (**self).current_page()
    }

    fn hits_path(&self) -> Option<&HitsPath> {
        (**self).hits_path()
    }

    fn set_hits_path(&mut self, path: &HitsPath) {
        (**self).set_hits_path(path);
    }
}

impl<P: PageSequence + ?Sized> PageSequence for Box<P> {
    fn restart(&mut self) -> Result<()> {
        (**self).restart()
    }

    fn advance_to_next_page(&mut self) -> Result<()> {
        (**self).advance_to_next_page()
    }

    fn has_current_page(&self) -> bool {
        (**self).has_current_page()
    }

    fn current_page(&self) -> Option<&Page> {
        (**self).current_page()
    }

    fn hits_path(&self) -> Option<&HitsPath> {
        (**self).hits_path()
    }

    fn set_hits_path(&mut self, path: &HitsPath) {
        (**self).set_hits_path(path);
    }
}
