//! Command-line surface and its execution.
//!
//! Every command produces a JSON value; `main` prints it.

use crate::error::Result;
use crate::state::App;
use cancionero_client::{
    Credentials, NewSong, NewUser, Pagination, Role, SongQuery, SongUpdate, UserUpdate,
};
use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "cancionero")]
#[command(about = "Command-line client for the Cancionero music catalog", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an account
    Register {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
        /// Register as administrator
        #[arg(long)]
        admin: bool,
    },
    /// Log in and persist the session token
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Forget the persisted session
    Logout,
    /// Show the user of the persisted session
    Whoami,
    /// Ask the server whether the persisted token is valid
    Verify,
    /// Manage users
    #[command(subcommand)]
    Users(UsersCommand),
    /// Browse and manage songs
    #[command(subcommand)]
    Songs(SongsCommand),
    /// Manage the favorites of the logged-in user
    #[command(subcommand)]
    Favorites(FavoritesCommand),
    /// Load a song into the player and show the player state
    Play {
        /// Song id
        id: i64,
    },
}

#[derive(Debug, Clone, Copy, Args)]
pub struct PageArgs {
    #[arg(long, default_value_t = 0)]
    pub skip: u32,
    #[arg(long, default_value_t = 100)]
    pub limit: u32,
}

impl From<PageArgs> for Pagination {
    fn from(args: PageArgs) -> Self {
        Pagination::new(args.skip, args.limit)
    }
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    List(PageArgs),
    Show {
        id: i64,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// usuario | administrador
        #[arg(long)]
        role: Option<Role>,
        #[arg(long)]
        active: Option<bool>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Debug, Args)]
pub struct SongFields {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub artist: String,
    #[arg(long)]
    pub album: String,
    /// Length in seconds
    #[arg(long)]
    pub duration: u32,
    #[arg(long)]
    pub year: i32,
    #[arg(long)]
    pub genre: String,
    #[arg(long)]
    pub audio_url: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum SongsCommand {
    List(PageArgs),
    Search {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        artist: Option<String>,
        #[arg(long)]
        genre: Option<String>,
    },
    Show {
        id: i64,
    },
    Add(SongFields),
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        artist: Option<String>,
        #[arg(long)]
        album: Option<String>,
        #[arg(long)]
        duration: Option<u32>,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        genre: Option<String>,
        #[arg(long)]
        audio_url: Option<String>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum FavoritesCommand {
    List,
    Add { song_id: i64 },
    Remove { song_id: i64 },
}

/// Execute `command` against `app`.
pub async fn run(app: &App, command: Command) -> Result<Value> {
    match command {
        Command::Register {
            name,
            email,
            password,
            admin,
        } => {
            let role = if admin { Role::Admin } else { Role::Regular };
            let user = app
                .client
                .register(&NewUser::new(name, email, password).with_role(role))
                .await?;
            Ok(serde_json::to_value(user)?)
        }
        Command::Login { email, password } => {
            let user = app.auth.login(&Credentials::new(email, password)).await?;
            Ok(serde_json::to_value(user)?)
        }
        Command::Logout => {
            app.auth.logout().await?;
            Ok(json!({ "logged_out": true }))
        }
        Command::Whoami => {
            let user = app.auth.restore_session().await?;
            Ok(serde_json::to_value(user)?)
        }
        Command::Verify => {
            let verification = app.client.verify_token().await?;
            Ok(json!({
                "valid": verification.valid,
                "user_id": verification.user_id,
                "email": verification.email,
                "role": verification.role,
                "active": verification.active,
            }))
        }
        Command::Users(command) => run_users(app, command).await,
        Command::Songs(command) => run_songs(app, command).await,
        Command::Favorites(command) => run_favorites(app, command).await,
        Command::Play { id } => {
            let song = app.client.get_song(id).await?;
            info!(song_id = song.id, title = %song.title, "Playing");
            app.player.play_song(song);
            Ok(serde_json::to_value(app.player.state())?)
        }
    }
}

async fn run_users(app: &App, command: UsersCommand) -> Result<Value> {
    match command {
        UsersCommand::List(page) => {
            let users = app.client.list_users(page.into()).await?;
            Ok(serde_json::to_value(users)?)
        }
        UsersCommand::Show { id } => Ok(serde_json::to_value(app.client.get_user(id).await?)?),
        UsersCommand::Update {
            id,
            name,
            email,
            role,
            active,
        } => {
            let update = UserUpdate {
                name,
                email,
                role,
                active,
            };
            Ok(serde_json::to_value(
                app.client.update_user(id, &update).await?,
            )?)
        }
        UsersCommand::Delete { id } => {
            app.client.delete_user(id).await?;
            Ok(json!({ "deleted": id }))
        }
    }
}

async fn run_songs(app: &App, command: SongsCommand) -> Result<Value> {
    match command {
        SongsCommand::List(page) => {
            let songs = app.client.list_songs(page.into()).await?;
            Ok(serde_json::to_value(songs)?)
        }
        SongsCommand::Search {
            title,
            artist,
            genre,
        } => {
            let query = SongQuery {
                title,
                artist,
                genre,
            };
            Ok(serde_json::to_value(app.client.search_songs(&query).await?)?)
        }
        SongsCommand::Show { id } => Ok(serde_json::to_value(app.client.get_song(id).await?)?),
        SongsCommand::Add(fields) => {
            let song = NewSong {
                title: fields.title,
                artist: fields.artist,
                album: fields.album,
                duration: fields.duration,
                year: fields.year,
                genre: fields.genre,
                audio_url: fields.audio_url,
            };
            Ok(serde_json::to_value(app.client.create_song(&song).await?)?)
        }
        SongsCommand::Update {
            id,
            title,
            artist,
            album,
            duration,
            year,
            genre,
            audio_url,
        } => {
            let update = SongUpdate {
                title,
                artist,
                album,
                duration,
                year,
                genre,
                audio_url,
            };
            Ok(serde_json::to_value(
                app.client.update_song(id, &update).await?,
            )?)
        }
        SongsCommand::Delete { id } => {
            app.client.delete_song(id).await?;
            Ok(json!({ "deleted": id }))
        }
    }
}

async fn run_favorites(app: &App, command: FavoritesCommand) -> Result<Value> {
    app.auth.restore_session().await?;
    let user = app.auth.require_user()?;

    match command {
        FavoritesCommand::List => Ok(serde_json::to_value(
            app.client.list_favorites(user.id).await?,
        )?),
        FavoritesCommand::Add { song_id } => Ok(serde_json::to_value(
            app.client.add_favorite(user.id, song_id).await?,
        )?),
        FavoritesCommand::Remove { song_id } => {
            app.client.remove_favorite(user.id, song_id).await?;
            Ok(json!({ "removed": song_id }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from([
            "cancionero",
            "songs",
            "search",
            "--artist",
            "Soda Stereo",
        ])
        .unwrap();

        match cli.command {
            Command::Songs(SongsCommand::Search {
                title,
                artist,
                genre,
            }) => {
                assert_eq!(title, None);
                assert_eq!(artist.as_deref(), Some("Soda Stereo"));
                assert_eq!(genre, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_list_defaults_and_global_config() {
        let cli = Cli::try_parse_from(["cancionero", "users", "list", "--config", "x.toml"])
            .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        match cli.command {
            Command::Users(UsersCommand::List(page)) => {
                assert_eq!(Pagination::from(page), Pagination::default());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_role() {
        let cli = Cli::try_parse_from([
            "cancionero",
            "users",
            "update",
            "3",
            "--role",
            "administrador",
            "--active",
            "false",
        ])
        .unwrap();

        match cli.command {
            Command::Users(UsersCommand::Update { id, role, active, .. }) => {
                assert_eq!(id, 3);
                assert_eq!(role, Some(Role::Admin));
                assert_eq!(active, Some(false));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_bad_role_rejected() {
        assert!(Cli::try_parse_from(["cancionero", "users", "update", "3", "--role", "root"])
            .is_err());
    }
}
