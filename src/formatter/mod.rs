//! Rendering of outline entries for the terminal (text) and for tools (JSON).

mod json;
mod page;
mod text;

pub use json::{render_json, FileOutline};
pub use page::{paginate, Page};
pub use text::{fallback_header, outline_header, render_entries, render_section};
