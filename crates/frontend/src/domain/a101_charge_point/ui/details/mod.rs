use contracts::domain::{ChargePoint, Connector, Transaction};
use contracts::shared::api::ListParams;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;
use thaw::*;

use super::command_dialog::RemoteCommandDialog;
use super::status_dialog::{StatusDialog, StatusTarget};
use crate::domain::a101_charge_point::api;
use crate::layout::use_modal_state;
use crate::shared::components::ui::{StatusBadge, StatusKind};
use crate::shared::date_utils::format_timestamp;
use crate::shared::format::{format_decimal, format_kwh};
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::state::dashboard_store::use_dashboard_store;

/// `:id` route parameter; anything but a positive integer is rejected.
pub fn parse_id(raw: Option<&str>) -> Option<u32> {
    raw?.trim().parse::<u32>().ok().filter(|id| *id > 0)
}

/// Connectors in the order the station numbers them.
fn sorted_connectors(cp: &ChargePoint) -> Vec<Connector> {
    let mut connectors = cp.connectors.clone();
    connectors.sort_by_key(|c| c.connector_id);
    connectors
}

/// Rows in the "Sessions" card.
const RECENT_SESSIONS: usize = 10;

/// Sessions of one station, newest first.
///
/// `GET /charge-points/{id}` preloads connectors only, so sessions come
/// from the transaction list.
pub fn recent_sessions(items: &[Transaction], charge_point_id: u32) -> Vec<Transaction> {
    let mut sessions: Vec<Transaction> = items
        .iter()
        .filter(|tx| tx.charge_point_id == charge_point_id)
        .cloned()
        .collect();
    sessions.sort_by(|a, b| b.start_time.cmp(&a.start_time));
    sessions.truncate(RECENT_SESSIONS);
    sessions
}

#[component]
fn InfoRow(label: &'static str, value: String) -> impl IntoView {
    let value = if value.trim().is_empty() {
        "—".to_string()
    } else {
        value
    };
    view! {
        <div class="detail-grid__row">
            <span class="detail-grid__label">{label}</span>
            <span class="detail-grid__value">{value}</span>
        </div>
    }
}

#[component]
pub fn ChargePointDetails() -> impl IntoView {
    let store = use_dashboard_store();
    let params = use_params_map();
    let charge_point = RwSignal::new(None::<ChargePoint>);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let status_open = use_modal_state();
    let command_open = use_modal_state();

    let id = Memo::new(move |_| params.with(|p| parse_id(p.get("id").as_deref())));

    let load = move || {
        let Some(id) = id.get_untracked() else {
            set_error.set(Some("Invalid charge point id".to_string()));
            return;
        };
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::get_charge_point(id).await {
                Ok(cp) => charge_point.set(Some(cp)),
                Err(e) => {
                    log::error!("Error fetching charge point {}: {}", id, e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
        spawn_local(async move {
            store.fetch_transactions(ListParams::default()).await;
        });
    };

    Effect::new(move |_| {
        id.track();
        load();
    });

    let status_target = Signal::derive(move || {
        charge_point.with(|cp| {
            cp.as_ref()
                .map(|cp| -> StatusTarget { (cp.id, cp.charge_point_code.clone(), cp.status.clone()) })
        })
    });
    let command_target = Signal::derive(move || {
        charge_point.with(|cp| cp.as_ref().map(|cp| (cp.id, cp.charge_point_code.clone())))
    });
    let title = move || {
        charge_point.with(|cp| {
            cp.as_ref()
                .map(|cp| cp.charge_point_code.clone())
                .unwrap_or_else(|| "Charge point".to_string())
        })
    };

    view! {
        <PageFrame page_id="a101_charge_point--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <A href="/charge-points" attr:class="page__back">{icon("arrow-left")}</A>
                    <h1 class="page__title">{title}</h1>
                    {move || charge_point.get().map(|cp| view! {
                        <StatusBadge kind=StatusKind::ChargePoint status=cp.status />
                    })}
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| status_open.set(true)
                        disabled=Signal::derive(move || charge_point.with(|cp| cp.is_none()))
                    >
                        {icon("edit")}
                        " Change status"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| command_open.set(true)
                        disabled=Signal::derive(move || charge_point.with(|cp| cp.is_none()))
                    >
                        {icon("bolt")}
                        " Remote command"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| load()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                <Show when=move || loading.get() && charge_point.with(|cp| cp.is_none())>
                    <Flex gap=FlexGap::Small style="align-items: center; justify-content: center; padding: var(--spacing-xl);">
                        <Spinner />
                    </Flex>
                </Show>

                {move || charge_point.get().map(|cp| {
                    let connectors = sorted_connectors(&cp);
                    let cp_id = cp.id;
                    view! {
                        <Card>
                            <CardHeader>
                                <h2 class="card__title">"Station"</h2>
                            </CardHeader>
                            <div class="detail-grid">
                                <InfoRow label="Code" value=cp.charge_point_code.clone() />
                                <InfoRow label="Vendor" value=cp.charge_point_vendor.clone() />
                                <InfoRow label="Model" value=cp.charge_point_model.clone() />
                                <InfoRow label="Serial number" value=cp.charge_point_serial_number.clone() />
                                <InfoRow label="Charge box serial" value=cp.charge_box_serial_number.clone() />
                                <InfoRow label="Firmware" value=cp.firmware_version.clone() />
                                <InfoRow label="Meter" value=format!("{} {}", cp.meter_type, cp.meter_serial_number) />
                                <InfoRow label="ICCID / IMSI" value=format!("{} {}", cp.iccid, cp.imsi) />
                                <InfoRow label="Last heartbeat" value=format_timestamp(cp.last_heartbeat.as_ref()) />
                                <InfoRow label="Last boot" value=format_timestamp(cp.last_boot_notification.as_ref()) />
                                <InfoRow label="Registered" value=format_timestamp(cp.created_at.as_ref()) />
                            </div>
                        </Card>

                        <Card>
                            <CardHeader>
                                <h2 class="card__title">"Connectors"</h2>
                            </CardHeader>
                            <Table>
                                <TableHeader>
                                    <TableRow>
                                        <TableHeaderCell>"#"</TableHeaderCell>
                                        <TableHeaderCell>"Status"</TableHeaderCell>
                                        <TableHeaderCell>"Error code"</TableHeaderCell>
                                        <TableHeaderCell>"Info"</TableHeaderCell>
                                        <TableHeaderCell>"Updated"</TableHeaderCell>
                                    </TableRow>
                                </TableHeader>
                                <TableBody>
                                    {connectors.into_iter().map(|c| view! {
                                        <TableRow>
                                            <TableCell>{c.connector_id}</TableCell>
                                            <TableCell>
                                                <StatusBadge kind=StatusKind::ChargePoint status=c.status.clone() />
                                            </TableCell>
                                            <TableCell>{c.error_code.clone()}</TableCell>
                                            <TableCell>{c.info.clone()}</TableCell>
                                            <TableCell>{format_timestamp(c.updated_at.as_ref())}</TableCell>
                                        </TableRow>
                                    }).collect_view()}
                                </TableBody>
                            </Table>
                        </Card>

                        <Card>
                            <CardHeader>
                                <h2 class="card__title">"Sessions"</h2>
                            </CardHeader>
                            <Table>
                                <TableHeader>
                                    <TableRow>
                                        <TableHeaderCell>"Transaction"</TableHeaderCell>
                                        <TableHeaderCell>"Connector"</TableHeaderCell>
                                        <TableHeaderCell>"Started"</TableHeaderCell>
                                        <TableHeaderCell>"Stopped"</TableHeaderCell>
                                        <TableHeaderCell>"Energy"</TableHeaderCell>
                                        <TableHeaderCell>"Cost"</TableHeaderCell>
                                        <TableHeaderCell>"Status"</TableHeaderCell>
                                    </TableRow>
                                </TableHeader>
                                <TableBody>
                                    {move || {
                                        store.transactions.with(|s| recent_sessions(&s.items, cp_id))
                                            .into_iter()
                                            .map(|tx| view! {
                                                <TableRow>
                                                    <TableCell>{tx.transaction_id}</TableCell>
                                                    <TableCell>{tx.connector_id}</TableCell>
                                                    <TableCell>{format_timestamp(tx.start_time.as_ref())}</TableCell>
                                                    <TableCell>{format_timestamp(tx.stop_time.as_ref())}</TableCell>
                                                    <TableCell>{format_kwh(tx.energy_consumed)}</TableCell>
                                                    <TableCell>{format_decimal(tx.total_cost, 2)}</TableCell>
                                                    <TableCell>
                                                        <StatusBadge kind=StatusKind::Transaction status=tx.status />
                                                    </TableCell>
                                                </TableRow>
                                            })
                                            .collect_view()
                                    }}
                                </TableBody>
                            </Table>
                            <Show when=move || store.transactions.with(|s| recent_sessions(&s.items, cp_id).is_empty())>
                                <div class="table__empty">"No sessions yet"</div>
                            </Show>
                        </Card>
                    }
                })}
            </div>

            <StatusDialog
                open=status_open
                target=status_target
                on_changed=Callback::new(move |status: String| {
                    charge_point.update(|cp| {
                        if let Some(cp) = cp {
                            cp.status = status;
                        }
                    })
                })
            />
            <RemoteCommandDialog
                open=command_open
                target=command_target
                on_sent=Callback::new(move |_| load())
            />
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_id_parsing() {
        assert_eq!(parse_id(Some("12")), Some(12));
        assert_eq!(parse_id(Some(" 7 ")), Some(7));
        assert_eq!(parse_id(Some("0")), None);
        assert_eq!(parse_id(Some("abc")), None);
        assert_eq!(parse_id(None), None);
    }

    #[test]
    fn connectors_sorted_by_number() {
        let cp = ChargePoint {
            connectors: vec![
                Connector { id: 10, connector_id: 2, ..Default::default() },
                Connector { id: 11, connector_id: 1, ..Default::default() },
            ],
            ..Default::default()
        };
        let ids: Vec<_> = sorted_connectors(&cp).iter().map(|c| c.connector_id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn sessions_are_filtered_by_station_newest_first() {
        use chrono::{TimeZone, Utc};
        let tx = |id: u32, cp: u32, month: u32| Transaction {
            id,
            charge_point_id: cp,
            start_time: Some(Utc.with_ymd_and_hms(2024, month, 1, 0, 0, 0).unwrap()),
            ..Default::default()
        };
        let items = vec![tx(1, 7, 1), tx(2, 8, 2), tx(3, 7, 3)];
        let ids: Vec<_> = recent_sessions(&items, 7).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert!(recent_sessions(&items, 99).is_empty());
    }

    #[test]
    fn sessions_are_capped() {
        let items: Vec<_> = (1..=25)
            .map(|id| Transaction { id, charge_point_id: 7, ..Default::default() })
            .collect();
        assert_eq!(recent_sessions(&items, 7).len(), RECENT_SESSIONS);
    }

    #[test]
    fn detail_body_without_sessions_still_decodes() {
        let cp: ChargePoint = serde_json::from_value(serde_json::json!({
            "id": 7,
            "chargePointCode": "CP-007",
            "connectors": [{ "id": 1, "chargePointId": 7, "connectorId": 1, "status": "Available" }],
            "transactions": null
        }))
        .unwrap();
        assert_eq!(cp.connectors.len(), 1);
        assert!(recent_sessions(&[], cp.id).is_empty());
    }
}
