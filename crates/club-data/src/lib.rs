// Operations
mod operations;
pub use operations::*;

// Models
mod users;
pub use users::*;

mod payments;
pub use payments::*;

mod events;
pub use events::*;

mod expenses;
pub use expenses::*;
