//! Executes reducer effects against a [`Loader`] and feeds completions back.

use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;

use crate::loader::Loader;

use super::event::{Effect, ViewEvent};
use super::state::ViewState;

pub fn execute(loader: Loader, effect: Effect) -> BoxFuture<'static, ViewEvent> {
    async move {
        match effect {
            Effect::LoadRuns => ViewEvent::RunsLoaded(loader.runs().await),
            Effect::LoadIndex { tag, run_id } => ViewEvent::IndexLoaded {
                tag,
                result: loader.index(run_id.as_deref()).await,
            },
            Effect::LoadTask {
                tag,
                run_id,
                task_id,
            } => ViewEvent::TaskLoaded {
                tag,
                result: loader.task(run_id.as_deref(), &task_id).await,
            },
        }
    }
    .boxed()
}

/// Applies `events`, then keeps applying fetch completions in the order they
/// settle until nothing is in flight.
pub async fn drive(
    loader: &Loader,
    mut state: ViewState,
    events: impl IntoIterator<Item = ViewEvent>,
) -> ViewState {
    let mut pending = FuturesUnordered::new();
    for event in events {
        let (next, effects) = state.apply(event);
        state = next;
        pending.extend(effects.into_iter().map(|e| execute(loader.clone(), e)));
    }
    while let Some(event) = pending.next().await {
        let (next, effects) = state.apply(event);
        state = next;
        pending.extend(effects.into_iter().map(|e| execute(loader.clone(), e)));
    }
    state
}
