pub mod payload;

pub use payload::{GoalPayload, LoginInput, LoginPayload, RegisterInput, RegisterPayload, TaskPayload};
