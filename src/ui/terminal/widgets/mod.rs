//! Widgets for the analysis tab

pub mod cloud;
pub mod table;

pub use cloud::CloudWidget;
pub use table::common_words_table;
