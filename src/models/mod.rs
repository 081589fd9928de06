mod canteen;
mod forecast;
mod meal;

pub use canteen::{
    Attendance, AttendanceStatus, Feedback, MAX_RATING, MIN_RATING, Menu, MenuItem, Role, User,
};
pub use forecast::{ForecastResult, ModelStatus, PrepSheet};
pub use meal::{MealContext, MealType, day_of_week, parse_date};
