use genre_sync::cli;
use genre_sync::updater::GenreSource;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    cli::main(GenreSource::Html).await
}
