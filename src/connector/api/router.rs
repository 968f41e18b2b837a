use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{CheckInController, PanicPlanController};

pub struct Router<'a> {
    panic_plan_controller: PanicPlanController<'a>,
    check_in_controller: CheckInController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            panic_plan_controller: PanicPlanController::new(container),
            check_in_controller: CheckInController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Plan {
                intake,
                system_prompt,
                format,
            } => {
                self.panic_plan_controller
                    .generate(intake, system_prompt, format)
                    .await
            }
            Commands::CheckIn {
                mood,
                tags,
                note,
                format,
            } => {
                self.check_in_controller
                    .check_in(mood, tags, note, format)
                    .await
            }
            Commands::Serve { .. } => unreachable!("Serve command is handled separately in main"),
        }
    }
}
