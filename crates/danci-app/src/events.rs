use std::sync::Arc;
use std::time::Duration;

use danci_core::session::{LookupOutcome, SessionCoordinator, SessionError};
use danci_core::store::VocabularyStore;
use danci_gateway::GatewayClient;
use danci_store::{MemoryStore, SupabaseStore};
use danci_types::AppEvent;
use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

/// App's main loop: owns the session coordinator and serializes user
/// actions, so at most one manual search is in flight.
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut coordinator = {
        let config = state.config.read().await;

        let lookup = Arc::new(GatewayClient::new(&config.gateway));
        let store: Arc<dyn VocabularyStore> = if config.store.is_configured() {
            Arc::new(SupabaseStore::new(&config.store))
        } else {
            tracing::warn!("SUPABASE_URL not set, saved words stay in memory");
            Arc::new(MemoryStore::new())
        };

        SessionCoordinator::new(
            lookup,
            store,
            Duration::from_millis(config.session.prefetch_interval_ms),
        )
    };

    if let Err(e) = coordinator.load_saved().await {
        tracing::warn!("could not load saved words: {e}");
    }

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => return Ok(()),
            event = ui_to_app_rx.recv() => event?,
        };

        handle_event(&mut coordinator, &app_to_ui_tx, event).await?;
    }
}

async fn handle_event(
    coordinator: &mut SessionCoordinator,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::Search(term) => match coordinator.search(&term).await {
            Ok(LookupOutcome::Detail(detail)) => {
                app_to_ui_tx.send(AppEvent::ShowDetail(detail)).await?;
            }
            Ok(LookupOutcome::Candidates(candidates)) => {
                app_to_ui_tx
                    .send(AppEvent::ShowCandidates(candidates))
                    .await?;
            }
            Err(e) => notify_failure(app_to_ui_tx, "解説の生成に失敗しました。", e).await?,
        },
        AppEvent::SelectCandidate(index) => match coordinator.select_candidate(index).await {
            Ok(detail) => app_to_ui_tx.send(AppEvent::ShowDetail(detail)).await?,
            Err(e) => notify_failure(app_to_ui_tx, "解説の生成に失敗しました。", e).await?,
        },
        AppEvent::OpenSaved(index) => match coordinator.open_saved(index) {
            Ok(detail) => app_to_ui_tx.send(AppEvent::ShowDetail(detail)).await?,
            Err(e) => notify_failure(app_to_ui_tx, "保存データを開けませんでした。", e).await?,
        },
        AppEvent::SaveCurrent => match coordinator.save_current().await {
            Ok(entry) => {
                app_to_ui_tx
                    .send(AppEvent::Notice(format!("単語帳に保存しました: {}", entry.word)))
                    .await?;
            }
            Err(e) => notify_failure(app_to_ui_tx, "保存に失敗しました。", e).await?,
        },
        AppEvent::DeleteSaved(id) => match coordinator.delete_saved(&id).await {
            Ok(()) => {
                app_to_ui_tx
                    .send(AppEvent::Notice("削除しました。".to_string()))
                    .await?;
            }
            Err(e) => notify_failure(app_to_ui_tx, "削除に失敗しました。", e).await?,
        },
        AppEvent::ListSaved => {
            app_to_ui_tx
                .send(AppEvent::ShowSavedList(coordinator.saved().to_vec()))
                .await?;
        }
        // app -> ui events are not ours to handle
        AppEvent::ShowDetail(_)
        | AppEvent::ShowCandidates(_)
        | AppEvent::ShowSavedList(_)
        | AppEvent::Notice(_) => {}
    }

    Ok(())
}

/// User-initiated failures surface as one generic notice; the specifics go
/// to the log only.
async fn notify_failure(
    app_to_ui_tx: &AsyncSender<AppEvent>,
    notice: &str,
    error: SessionError,
) -> anyhow::Result<()> {
    tracing::error!("{error}");
    app_to_ui_tx.send(AppEvent::Notice(notice.to_string())).await?;
    Ok(())
}
