mod members;
pub use members::Members;

mod payments;
pub use payments::Payments;

mod events;
pub use events::Events;

mod expenses;
pub use expenses::Expenses;

mod finance;
pub use finance::Finance;

mod qr;
pub use qr::Qr;

mod account;
pub use account::Account;

mod dashboard;
pub use dashboard::ShowDashboard;
