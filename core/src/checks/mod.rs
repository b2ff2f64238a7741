pub mod content;
pub mod files;
pub mod sample_data;
pub mod schema;
pub mod template;
pub mod test_data;
