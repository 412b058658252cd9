//! UI Components
//!
//! Reusable Leptos widgets shared by the pages.

mod search_bar;
mod pagination;
mod spinner;
mod modal;
mod delete_confirm_button;
mod field;
mod notice_bar;
mod nav;
mod page_header;

pub use search_bar::SearchBar;
pub use pagination::Pagination;
pub use spinner::Spinner;
pub use modal::Modal;
pub use delete_confirm_button::DeleteConfirmButton;
pub use field::{CheckboxField, SelectField, TextField};
pub use notice_bar::NoticeBar;
pub use nav::{AdminSidebar, PublicNav};
pub use page_header::PageHeader;
