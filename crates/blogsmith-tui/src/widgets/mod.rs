//! Custom widget components

mod error;
pub mod evidence;
mod form;
mod header;
mod loading;
pub mod past_blogs;
pub mod plan;
mod status_bar;
mod tabs;
mod welcome;

pub use error::ErrorPanel;
pub use evidence::EvidenceTable;
pub use form::TopicForm;
pub use header::MainHeader;
pub use loading::LoadingModal;
pub use past_blogs::PastBlogsList;
pub use plan::plan_lines;
pub use status_bar::StatusBar;
pub use tabs::ResultTabs;
pub use welcome::Welcome;
