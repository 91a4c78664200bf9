//! Progress and live-transcript observers

pub mod reporter;
