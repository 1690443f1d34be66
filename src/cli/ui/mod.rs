pub mod banner;
pub mod formatting;
pub mod prompts;
pub mod steps;
pub mod summary;
pub mod test_mode;
