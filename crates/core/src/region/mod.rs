//! Generated region inside the hand-authored host document.
//!
//! The ranked credits are rendered into a fragment bounded by a start/end
//! marker pair. That fragment replaces the existing marker-delimited region
//! of the host document; everything outside the markers is left
//! byte-for-byte intact. A document whose markers or enclosing block cannot
//! be found is rejected instead of being patched.

mod anchor;
mod document;
mod error;
mod render;

pub use anchor::RegionAnchor;
pub use document::HostDocument;
pub use error::{DocumentError, RegionError};
pub use render::{html_escape, RegionRenderer};
