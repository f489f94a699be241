pub mod goal;
pub mod task;
pub mod user;

pub use goal::{Goal, GoalInput};
pub use task::{Task, TaskInput};
pub use user::{NewUser, User, UserProfile};
