//! UI Components
//!
//! Reusable Leptos components.

mod delete_confirm_button;
mod position_details;
mod position_form;
mod position_tree_view;
mod status_banner;
mod tree_row;

pub use delete_confirm_button::DeleteConfirmButton;
pub use position_details::PositionDetails;
pub use position_form::PositionForm;
pub use position_tree_view::PositionTreeView;
pub use status_banner::StatusBanner;
pub use tree_row::TreeRowView;
