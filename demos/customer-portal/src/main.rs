//! Command-line walkthrough of a customer portal session.
//!
//! Each invocation is a fresh "page load": the session is hydrated from
//! the store file, one command runs, and the process exits. Run `login`
//! once and `whoami` keeps working until the token expires.
//!
//! ```text
//! customer-portal login a@b.com password
//! customer-portal profile --first-name Jane --last-name Doe
//! customer-portal whoami
//! customer-portal logout
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clientele::prelude::*;
use clientele::{
    Claims, Clock, KeyValueStore, SystemClock, TokenCodec, init_tracing,
};

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Debug, Parser)]
#[command(name = "customer-portal", about = "Sign in to the customer portal")]
struct Cli {
    /// Where the session is persisted between runs.
    #[arg(long, env = "CLIENTELE_STORE", default_value = "session.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in with an email and password.
    Login { email: String, password: String },
    /// Show who is signed in.
    Whoami,
    /// Edit the locally-stored profile.
    Profile {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        picture: Option<String>,
    },
    /// Sign out and forget the stored profile.
    Logout,
}

// ---------------------------------------------------------------------------
// In-process auth service
// ---------------------------------------------------------------------------

/// How long tokens issued by [`DemoApi`] stay valid.
const TOKEN_TTL_SECS: u64 = 3600;

/// The only password [`DemoApi`] accepts.
const DEMO_PASSWORD: &str = "password";

#[derive(Debug, thiserror::Error)]
enum DemoAuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("could not issue token: {0}")]
    Issue(#[from] clientele::TokenError),
}

/// Stands in for the customer API's `/api/v1/auth/login` endpoint.
struct DemoApi;

impl AuthService for DemoApi {
    type Error = DemoAuthError;

    async fn login(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthResponse, DemoAuthError> {
        if credentials.password != DEMO_PASSWORD
            || !credentials.username.contains('@')
        {
            return Err(DemoAuthError::InvalidCredentials);
        }

        let now = SystemClock.now_millis() / 1000;
        let mut claims = Claims::new(
            credentials.username.clone(),
            vec!["ROLE_USER".into()],
            now + TOKEN_TTL_SECS,
        );
        claims.issued_at = Some(now);
        let token = JwtCodec.encode(&claims)?;

        Ok(AuthResponse::new(200)
            .with_header("Authorization", format!("Bearer {token}"))
            .with_body(serde_json::json!({
                "token": token,
                "customerDTO": { "email": credentials.username },
            })))
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn describe(session: &Session) -> String {
    let name = session.full_name();
    let name = if name.is_empty() { "no name set" } else { &name };
    format!(
        "{} ({name})\n  scopes:  {}\n  picture: {}\n  expires: {}",
        session.subject(),
        session.scopes().join(", "),
        session.profile_picture(),
        session.expires_at(),
    )
}

async fn execute<B: KeyValueStore>(
    sessions: &mut SessionManager<DemoApi, B>,
    command: Command,
) -> Result<String, ClienteleError> {
    match command {
        Command::Login { email, password } => {
            sessions.login(&Credentials::new(email, password)).await?;
            let session = sessions.session().map(describe).unwrap_or_default();
            Ok(format!("signed in as {session}"))
        }
        Command::Whoami => {
            if !sessions.is_authenticated()? {
                return Ok("not signed in".into());
            }
            Ok(sessions
                .session()
                .map(describe)
                .unwrap_or_else(|| "not signed in".into()))
        }
        Command::Profile {
            first_name,
            last_name,
            picture,
        } => {
            let update = ProfileUpdate {
                first_name,
                last_name,
                profile_picture: picture,
            };
            if update.is_empty() {
                return Ok("nothing to update".into());
            }
            Ok(match sessions.update_profile(update)? {
                Some(session) => format!("updated {}", describe(&session)),
                None => "not signed in".into(),
            })
        }
        Command::Logout => {
            sessions.logout()?;
            Ok("signed out".into())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    let mut sessions = SessionManager::new(
        SessionStore::new(FileStore::new(&cli.store)),
        JwtCodec,
        DemoApi,
        SessionConfig::default(),
    );
    sessions.hydrate()?;
    tracing::debug!(state = %sessions.state(), store = %cli.store.display(), "hydrated");

    println!("{}", execute(&mut sessions, cli.command).await?);
    Ok(())
}
