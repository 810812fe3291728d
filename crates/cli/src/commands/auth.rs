//! Session commands.
//!
//! # Usage
//!
//! ```bash
//! eg-cli auth login -e jane@example.com -p hunter2
//! eg-cli auth register -e jane@example.com -n "Jane Doe" -p hunter2
//! eg-cli auth whoami
//! eg-cli auth logout
//! ```

use clap::Subcommand;
use thiserror::Error;

use easy_gadget_client::{ApiError, Client};
use easy_gadget_core::{Email, EmailError};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Log in with email and password
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Complete an OTP challenge sent by email
    VerifyOtp {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// One-time code from the email
        #[arg(short, long)]
        otp: String,
    },
    /// Create a new account
    Register {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Account password
        #[arg(short, long)]
        password: String,

        /// Phone number
        #[arg(long)]
        phone: Option<String>,
    },
    /// Request a password-reset email
    ForgotPassword {
        /// Account email address
        #[arg(short, long)]
        email: String,
    },
    /// Show the cached session user
    Whoami,
    /// Log out and clear the persisted session
    Logout,
}

/// Errors that can occur during auth commands.
#[derive(Debug, Error)]
pub enum AuthCommandError {
    /// The email argument failed validation.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The backend rejected the request.
    #[error(transparent)]
    Api(#[from] ApiError),
}

pub async fn run(client: &Client, action: AuthAction) -> Result<(), AuthCommandError> {
    match action {
        AuthAction::Login { email, password } => {
            let email: Email = email.parse()?;
            let user = client.auth().login(&email, &password).await?;
            tracing::info!("Logged in as {} ({})", user.name, user.email);
        }
        AuthAction::VerifyOtp { email, otp } => {
            let email: Email = email.parse()?;
            let user = client.auth().verify_otp(&email, &otp).await?;
            tracing::info!("Logged in as {} ({})", user.name, user.email);
        }
        AuthAction::Register {
            email,
            name,
            password,
            phone,
        } => {
            // Validate locally before the round trip
            let _: Email = email.parse()?;
            let message = client
                .auth()
                .register(&easy_gadget_client::types::Registration {
                    name,
                    email,
                    password,
                    phone,
                })
                .await?;
            tracing::info!("{message}");
        }
        AuthAction::ForgotPassword { email } => {
            let email: Email = email.parse()?;
            let message = client.auth().forgot_password(&email).await?;
            tracing::info!("{message}");
        }
        AuthAction::Whoami => match client.current_user() {
            Some(user) => {
                tracing::info!("{} ({})", user.name, user.email);
                if user.is_admin() {
                    tracing::info!("Role: admin");
                }
            }
            None => tracing::info!("Not logged in"),
        },
        AuthAction::Logout => {
            client.auth().logout().await;
            tracing::info!("Logged out");
        }
    }
    Ok(())
}
