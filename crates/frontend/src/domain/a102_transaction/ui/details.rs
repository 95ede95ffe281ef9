use contracts::domain::Transaction;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a102_transaction::api;
use crate::layout::Modal;
use crate::shared::components::ui::{StatusBadge, StatusKind};
use crate::shared::date_utils::{format_duration, format_timestamp, is_set};
use crate::shared::format::{format_decimal, format_energy_wh, format_kwh};

/// Session length; running sessions count up to `now`.
pub fn session_duration(tx: &Transaction, now: chrono::DateTime<chrono::Utc>) -> Option<String> {
    let start = tx.start_time.filter(|t| is_set(t))?;
    let end = tx.stop_time.filter(|t| is_set(t)).unwrap_or(now);
    Some(format_duration(&start, &end))
}

/// Modal with the full record from `GET /transactions/{id}`.
#[component]
pub fn TransactionDetails(open: RwSignal<bool>, #[prop(into)] id: Signal<Option<u32>>) -> impl IntoView {
    let transaction = RwSignal::new(None::<Transaction>);
    let (error, set_error) = signal::<Option<String>>(None);

    Effect::new(move |_| {
        if !open.get() {
            return;
        }
        let Some(id) = id.get_untracked() else {
            return;
        };
        transaction.set(None);
        set_error.set(None);
        spawn_local(async move {
            match api::get_transaction(id).await {
                Ok(tx) => transaction.set(Some(tx)),
                Err(e) => {
                    log::error!("Error fetching transaction {}: {}", id, e);
                    set_error.set(Some(e.to_string()));
                }
            }
        });
    });

    let title = Signal::derive(move || match id.get() {
        Some(id) => format!("Transaction #{}", id),
        None => "Transaction".to_string(),
    });

    view! {
        <Modal open=open title=title>
            <div class="modal-body">
                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}
                {move || transaction.get().map(|tx| {
                    let duration = session_duration(&tx, chrono::Utc::now()).unwrap_or_else(|| "—".to_string());
                    view! {
                        <div class="detail-grid">
                            <div class="detail-grid__row">
                                <span class="detail-grid__label">"Status"</span>
                                <StatusBadge kind=StatusKind::Transaction status=tx.status.clone() />
                            </div>
                            <div class="detail-grid__row">
                                <span class="detail-grid__label">"Charge point"</span>
                                <span>{tx.charge_point_code().unwrap_or("—").to_string()}</span>
                            </div>
                            <div class="detail-grid__row">
                                <span class="detail-grid__label">"Connector"</span>
                                <span>{tx.connector_id}</span>
                            </div>
                            <div class="detail-grid__row">
                                <span class="detail-grid__label">"ID tag"</span>
                                <span>{tx.id_tag_value().unwrap_or("—").to_string()}</span>
                            </div>
                            <div class="detail-grid__row">
                                <span class="detail-grid__label">"Started"</span>
                                <span>{format_timestamp(tx.start_time.as_ref())}</span>
                            </div>
                            <div class="detail-grid__row">
                                <span class="detail-grid__label">"Stopped"</span>
                                <span>{format_timestamp(tx.stop_time.as_ref())}</span>
                            </div>
                            <div class="detail-grid__row">
                                <span class="detail-grid__label">"Duration"</span>
                                <span>{duration}</span>
                            </div>
                            <div class="detail-grid__row">
                                <span class="detail-grid__label">"Meter start / stop"</span>
                                <span>{format!("{} / {}", format_energy_wh(tx.start_meter_value), format_energy_wh(tx.stop_meter_value))}</span>
                            </div>
                            <div class="detail-grid__row">
                                <span class="detail-grid__label">"Energy"</span>
                                <span>{format_kwh(tx.energy_consumed)}</span>
                            </div>
                            <div class="detail-grid__row">
                                <span class="detail-grid__label">"Cost"</span>
                                <span>{format_decimal(tx.total_cost, 2)}</span>
                            </div>
                            <div class="detail-grid__row">
                                <span class="detail-grid__label">"Stop reason"</span>
                                <span>{if tx.reason.is_empty() { "—".to_string() } else { tx.reason.clone() }}</span>
                            </div>
                        </div>
                    }
                })}
            </div>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn running_session_counts_to_now() {
        let tx = Transaction {
            start_time: Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()),
            ..Default::default()
        };
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 10, 45, 0).unwrap();
        assert_eq!(session_duration(&tx, now).as_deref(), Some("45m"));
    }

    #[test]
    fn finished_session_uses_stop_time() {
        let tx = Transaction {
            start_time: Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()),
            stop_time: Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()),
            ..Default::default()
        };
        let now = Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap();
        assert_eq!(session_duration(&tx, now).as_deref(), Some("2h 30m"));
        assert_eq!(session_duration(&Transaction::default(), now), None);
    }
}
