//! Rendering layer: consumes the filtered Dataset's analysis, per-file load
//! reports, and the effective filter spec; produces display artifacts only.

pub mod console;
pub mod html;
