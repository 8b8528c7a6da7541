//! UI Components
//!
//! Leptos components for the canvas editor.

mod canvas_board;
mod canvas_item;
mod file_picker;
mod pending_list;
mod save_button;
mod toolbar;

pub use canvas_board::CanvasBoard;
pub use canvas_item::{GalleryCanvasItem, PendingCanvasItem};
pub use file_picker::FilePicker;
pub use pending_list::PendingList;
pub use save_button::SaveButton;
pub use toolbar::Toolbar;
