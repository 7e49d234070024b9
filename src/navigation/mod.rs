pub mod history;
pub mod page;

pub use history::NavigationHistory;
pub use page::Page;
