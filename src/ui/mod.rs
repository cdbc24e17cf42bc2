pub mod bottom_bar;
pub mod main_view;
pub mod result_view;
pub mod sidebar;
pub mod top;
pub mod util;
