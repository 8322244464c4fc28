//! Session-based AI diet and fitness coach backed by Gemini.
//!
//! Free-text meal and workout descriptions are sent to the model, which
//! answers with a small JSON estimate. The response is extracted and
//! validated best-effort, then folded into an append-only in-memory ledger
//! of the day's totals. A second model call over the accumulated state
//! produces coaching advice.

pub mod client;
pub mod energy;
pub mod extract;
pub mod gemini;
pub mod ledger;
pub mod models;
pub mod summary;
