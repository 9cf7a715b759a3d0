pub mod array_text;
