pub mod help;
pub mod log_view;
pub mod overlay;
pub mod result_view;
pub mod theme;
