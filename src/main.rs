use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use cinelist::{
    cli, config, error,
    types::{MoviePatch, NewMovie},
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Handle favorites
    Favorites(FavoritesOptions),

    /// Handle named lists
    Lists(ListsOptions),

    /// Handle custom movies
    Movies(MoviesOptions),

    /// Search TMDB for movies
    Search(SearchOptions),

    /// Run the local data API
    Serve,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct FavoritesOptions {
    #[command(subcommand)]
    pub command: Option<FavoritesSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum FavoritesSubcommand {
    /// Add a movie to favorites
    Add { movie_id: String },
    /// Remove a movie from favorites
    Remove { movie_id: String },
}

#[derive(Parser, Debug, Clone)]
pub struct ListsOptions {
    #[command(subcommand)]
    pub command: Option<ListsSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ListsSubcommand {
    /// Show the movies of a list
    Show { list_id: String },
    /// Create a new list
    Create {
        name: String,
        /// Use this id instead of a generated one
        #[clap(long)]
        id: Option<String>,
    },
    /// Rename a list
    Rename { list_id: String, name: String },
    /// Delete a list
    Delete { list_id: String },
    /// Add a movie to a list
    Add { list_id: String, movie_id: String },
    /// Remove a movie from a list
    Remove { list_id: String, movie_id: String },
}

#[derive(Parser, Debug, Clone)]
pub struct MoviesOptions {
    #[command(subcommand)]
    pub command: Option<MoviesSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum MoviesSubcommand {
    /// Add a custom movie
    Add(MovieFields),
    /// Update a custom movie
    Update {
        movie_id: String,
        #[clap(long)]
        title: Option<String>,
        #[clap(flatten)]
        details: MovieDetails,
    },
    /// Delete a custom movie
    Delete { movie_id: String },
    /// Open the TMDB page of a movie
    Open { movie_id: String },
}

#[derive(Parser, Debug, Clone)]
pub struct MovieFields {
    /// Title of the movie
    #[clap(long)]
    pub title: String,
    #[clap(flatten)]
    pub details: MovieDetails,
}

#[derive(Parser, Debug, Clone)]
pub struct MovieDetails {
    /// Release date (YYYY-MM-DD)
    #[clap(long)]
    pub release_date: Option<String>,
    /// Poster path or URL
    #[clap(long)]
    pub poster: Option<String>,
    /// Short synopsis
    #[clap(long)]
    pub overview: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    query: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn parse_release_date(date: Option<String>) -> Option<String> {
    let date = date?;
    if chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_err() {
        error!("Invalid release date {}, expected YYYY-MM-DD", date);
    }
    Some(date)
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Favorites(opt) => match opt.command {
            Some(FavoritesSubcommand::Add { movie_id }) => cli::add_favorite(movie_id).await,
            Some(FavoritesSubcommand::Remove { movie_id }) => {
                cli::remove_favorite(movie_id).await
            }
            None => cli::list_favorites().await,
        },

        Command::Lists(opt) => match opt.command {
            Some(ListsSubcommand::Show { list_id }) => cli::show_list(list_id).await,
            Some(ListsSubcommand::Create { name, id }) => cli::create_list(name, id).await,
            Some(ListsSubcommand::Rename { list_id, name }) => {
                cli::rename_list(list_id, name).await
            }
            Some(ListsSubcommand::Delete { list_id }) => cli::delete_list(list_id).await,
            Some(ListsSubcommand::Add { list_id, movie_id }) => {
                cli::add_to_list(list_id, movie_id).await
            }
            Some(ListsSubcommand::Remove { list_id, movie_id }) => {
                cli::remove_from_list(list_id, movie_id).await
            }
            None => cli::list_lists().await,
        },

        Command::Movies(opt) => match opt.command {
            Some(MoviesSubcommand::Add(fields)) => {
                cli::add_movie(NewMovie {
                    title: fields.title,
                    release_date: parse_release_date(fields.details.release_date),
                    poster_path: fields.details.poster,
                    overview: fields.details.overview,
                })
                .await
            }
            Some(MoviesSubcommand::Update {
                movie_id,
                title,
                details,
            }) => {
                cli::update_movie(
                    movie_id,
                    MoviePatch {
                        title,
                        release_date: parse_release_date(details.release_date),
                        poster_path: details.poster,
                        overview: details.overview,
                    },
                )
                .await
            }
            Some(MoviesSubcommand::Delete { movie_id }) => cli::delete_movie(movie_id).await,
            Some(MoviesSubcommand::Open { movie_id }) => cli::open_movie(movie_id).await,
            None => cli::list_movies().await,
        },

        Command::Search(opt) => cli::search(opt.query).await,
        Command::Serve => cli::serve().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
