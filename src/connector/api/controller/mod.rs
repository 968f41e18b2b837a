pub mod check_in_controller;
pub mod panic_plan_controller;

pub use check_in_controller::CheckInController;
pub use panic_plan_controller::PanicPlanController;
