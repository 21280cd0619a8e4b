use std::io::Write;

use clap::{Args, Subcommand, ValueEnum};
use storefront_app::{
    context::AppContext,
    session::{BearerToken, Credentials, Identity, Role, UserId},
};

use crate::{commands::output_error, render};

#[derive(Debug, Args)]
pub(crate) struct SessionCommand {
    #[command(subcommand)]
    command: SessionSubcommand,
}

#[derive(Debug, Subcommand)]
enum SessionSubcommand {
    /// Store a bearer token issued by the identity provider
    Login(LoginArgs),

    /// Show who is signed in
    Show,

    /// Forget stored credentials
    Logout,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RoleArg {
    User,
    Admin,
}

impl From<RoleArg> for Role {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::User => Self::User,
            RoleArg::Admin => Self::Admin,
        }
    }
}

#[derive(Debug, Args)]
struct LoginArgs {
    /// Bearer token
    #[arg(long, env = "STOREFRONT_TOKEN", hide_env_values = true)]
    token: String,

    /// Numeric user ID
    #[arg(long)]
    user_id: UserId,

    /// Username
    #[arg(long)]
    username: String,

    /// Role granted to the user
    #[arg(long, value_enum, default_value_t = RoleArg::User)]
    role: RoleArg,
}

pub(crate) async fn run(
    command: SessionCommand,
    context: &AppContext,
    out: &mut impl Write,
) -> Result<(), String> {
    match command.command {
        SessionSubcommand::Login(args) => {
            let token =
                BearerToken::new(args.token).ok_or_else(|| "token cannot be empty".to_string())?;
            let identity = Identity {
                id: args.user_id,
                username: args.username,
                role: args.role.into(),
            };

            context
                .session
                .persist(Credentials {
                    token,
                    identity: identity.clone(),
                })
                .await
                .map_err(|error| format!("failed to store session: {error}"))?;

            render::write_identity(out, Some(&identity)).map_err(output_error)
        }
        SessionSubcommand::Show => {
            let identity = context.session.identity().await;

            render::write_identity(out, identity.as_ref()).map_err(output_error)
        }
        SessionSubcommand::Logout => {
            context
                .session
                .clear()
                .await
                .map_err(|error| format!("failed to clear session: {error}"))?;

            writeln!(out, "signed out").map_err(output_error)
        }
    }
}
