pub mod auth_service;
pub mod dashboard_service;
pub mod goal_service;
pub mod task_service;

pub use auth_service::{AuthService, LoginResponse};
pub use dashboard_service::{average_progress, DashboardService, DashboardSummary, UPCOMING_TASK_LIMIT};
pub use goal_service::GoalService;
pub use task_service::TaskService;
