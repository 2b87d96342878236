//! `trajview show`: one task record as a standalone HTML page.

use trajview_core::api::{viewer_view, CliError, Loader, ViewerQuery};
use trajview_core::render::viewer_page;
use trajview_core::view::Content;

use super::cli::ShowArgs;

/// Renders the viewer page for `--task`, to `--out` or stdout. A blank task id
/// or a record that fails to load is an error and nothing is written.
pub async fn handle_show(args: ShowArgs, loader: &Loader) -> Result<(), CliError> {
    let query = ViewerQuery {
        task: Some(args.task.clone()),
        run: args.run.clone(),
    };
    let state = viewer_view(loader, &query).await;
    if state.left.task_id.is_none() {
        return Err(CliError::Command("missing task id".into()));
    }
    if let Content::Failed(e) = &state.left.record {
        return Err(CliError::Command(format!(
            "could not load task {}: {e}",
            args.task
        )));
    }

    let html = viewer_page(&state);
    match args.out {
        Some(path) => {
            std::fs::write(&path, html)?;
            tracing::info!(path = %path.display(), task_id = %args.task, "page written");
        }
        None => println!("{html}"),
    }
    Ok(())
}
