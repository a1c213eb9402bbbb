//! SIGNUP, LOGIN and LOGOUT commands.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use notes_client::Session;
use notes_core::AuthResponse;
use serde::Serialize;

use super::{HumanReadable, output, password_or_prompt};

/// Arguments for the signup and login commands.
#[derive(Args)]
pub struct CredentialArgs {
    /// Account email address
    pub email: String,

    /// Account password (read from stdin when omitted)
    #[arg(long, env = "NOTES_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Which authentication command produced an [`AuthOutput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthAction {
    Signup,
    Login,
}

/// What is printed after a successful signup or login. The token itself is
/// never printed.
#[derive(Debug, Serialize)]
pub struct AuthOutput {
    pub action: AuthAction,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AuthOutput {
    fn from_response(action: AuthAction, email: &str, response: AuthResponse) -> Self {
        Self {
            action,
            email: response
                .user
                .map(|u| u.email)
                .unwrap_or_else(|| email.to_string()),
            message: response.message,
        }
    }
}

impl HumanReadable for AuthOutput {
    fn print_human(&self) {
        let headline = match self.action {
            AuthAction::Signup => "Account created successfully!",
            AuthAction::Login => "Logged in successfully!",
        };
        println!("{}", headline.green().bold());
        println!();
        println!("  {} {}", "Email:".cyan(), self.email);
        if let Some(message) = &self.message {
            println!("  {} {}", "Message:".cyan(), message);
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LogoutOutput {
    pub logged_out: bool,
}

impl HumanReadable for LogoutOutput {
    fn print_human(&self) {
        println!("{}", "Logged out successfully".green().bold());
    }
}

/// Execute the signup command.
pub async fn signup(session: &mut Session, human: bool, args: CredentialArgs) -> Result<()> {
    let password = password_or_prompt(args.password)?;
    let response = session
        .signup(&args.email, &password)
        .await
        .map_err(super::session_failure)?;

    output(&AuthOutput::from_response(AuthAction::Signup, &args.email, response), human)
}

/// Execute the login command.
pub async fn login(session: &mut Session, human: bool, args: CredentialArgs) -> Result<()> {
    let password = password_or_prompt(args.password)?;
    let response = session
        .login(&args.email, &password)
        .await
        .map_err(super::session_failure)?;

    output(&AuthOutput::from_response(AuthAction::Login, &args.email, response), human)
}

/// Execute the logout command.
pub fn logout(session: &mut Session, human: bool) -> Result<()> {
    session.logout().map_err(super::session_failure)?;
    output(&LogoutOutput { logged_out: true }, human)
}

#[cfg(test)]
mod tests {
    use super::*;
    use notes_core::User;

    #[test]
    fn test_auth_output_prefers_server_email() {
        let response = AuthResponse {
            token: "secret".to_string(),
            user: Some(User {
                email: "server@example.com".to_string(),
            }),
            message: None,
        };
        let out = AuthOutput::from_response(AuthAction::Login, "typed@example.com", response);
        assert_eq!(out.email, "server@example.com");

        let json = serde_json::to_string(&out).unwrap();
        assert!(!json.contains("secret"));
        assert!(!json.contains("message"));
        assert!(json.contains(r#""action":"login""#));
    }

    #[test]
    fn test_auth_output_falls_back_to_typed_email() {
        let response = AuthResponse {
            token: "t".to_string(),
            user: None,
            message: Some("Welcome back".to_string()),
        };
        let out = AuthOutput::from_response(AuthAction::Signup, "typed@example.com", response);
        assert_eq!(out.email, "typed@example.com");
        assert_eq!(out.action, AuthAction::Signup);
        assert_eq!(out.message.as_deref(), Some("Welcome back"));
    }
}
