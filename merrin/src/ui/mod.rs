//! UI module root: the dashboard panel and its theme.

pub mod dashboard;
pub mod theme;
