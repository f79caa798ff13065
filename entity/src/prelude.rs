pub use super::password_reset_token::Entity as PasswordResetToken;
pub use super::poll::Entity as Poll;
pub use super::poll_option::Entity as PollOption;
pub use super::refresh_token::Entity as RefreshToken;
pub use super::report::Entity as Report;
pub use super::user::Entity as User;
pub use super::vote::Entity as Vote;
