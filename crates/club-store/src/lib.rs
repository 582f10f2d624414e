pub mod store;
pub use store::{generate_id, keys, open_test_file, Store, TestHandle};

pub mod results;
pub use results::StoreError;

mod seed;

pub mod users;
pub mod payments;
pub mod events;
pub mod expenses;
pub mod qrcode;

pub mod auth;
pub use auth::{NewAccount, DEFAULT_PASSWORD};
