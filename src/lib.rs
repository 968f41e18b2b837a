pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use cli::{Commands, OutputFormat};

pub use application::{
    CallerAuthenticator, ChatClient, DailyCheckInUseCase, GeneratePanicPlanUseCase, SecretProvider,
};

pub use connector::{
    EnvSecretProvider, FileSecretProvider, MockChatClient, OpenAiChatClient, RecordedCall,
    StaticTokenAuthenticator,
};

pub use domain::{
    CallerIdentity, ChatMessage, CheckIn, CheckInOutcome, Classification, Completion,
    CompletionOptions, CompletionPurpose, DailyCheckInRequest, DomainError, Exercise,
    GeneratedPlan, Intake, PanicPlanRequest, PlanStep, ResponseFormat, Role, Severity,
    SuggestedPath,
};
