pub mod legacy;
pub mod product;
pub mod user;

pub use product::*;
pub use user::*;
