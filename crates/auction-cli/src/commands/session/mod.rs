pub mod end;
pub mod list;
pub mod start;

pub use end::handle_end;
pub use list::handle_list;
pub use start::handle_start;
