pub mod app_list;
pub mod detail_panel;
pub mod entry_form;
pub mod file_picker;
pub mod footer;
pub mod tabs;
