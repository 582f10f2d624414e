mod dashboard;
pub use dashboard::*;

mod finance;
pub use finance::*;

mod event_status;
pub use event_status::*;
