pub mod checks;
pub mod descriptor;
pub mod package;
pub mod report;

pub mod error;
