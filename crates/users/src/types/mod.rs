//! Request, response and error types shared by the services.

pub mod errors;
pub mod requests;
pub mod responses;

pub use errors::{UserError, UserResult};
pub use requests::{NewGoalRequest, NutritionistSignupRequest, SignupProfile, SignupRequest};
pub use responses::{
    CurrentUser, GoalStats, GoalTypeStats, NutritionistRegistration, SignupResponse,
};
