mod record;
mod user;

pub use record::*;
pub use user::*;
