mod daily_check_in;
mod generate_panic_plan;

pub use daily_check_in::*;
pub use generate_panic_plan::*;
