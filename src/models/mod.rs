mod user;

pub use user::{NewUser, NewUserDocument, UpdateUser, User};
