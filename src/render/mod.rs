//! Rendering outlines and line streams to output formats.

mod json;
mod markdown;

pub use json::{
    append_json_record, lines_to_json, read_lines_json, to_json, to_json_value, write_json,
    JsonFormat,
};
pub use markdown::to_markdown;
