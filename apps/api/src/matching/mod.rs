//! The matching core: text extraction, skill extraction, similarity scoring,
//! and the cross-product run. Everything below `handlers` is UI-independent
//! and callable headlessly.

pub mod extract;
pub mod handlers;
pub mod matcher;
pub mod report;
pub mod scoring;
pub mod skills;
