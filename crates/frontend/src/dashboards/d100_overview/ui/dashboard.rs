use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use contracts::dashboards::overview::DashboardStats;
use contracts::shared::api::ListParams;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use thaw::*;

use crate::shared::components::stat_card::{offline_tone, CardTone, StatCard};
use crate::shared::components::ui::{StatusBadge, StatusKind};
use crate::shared::components::weekly_chart::WeeklyChartView;
use crate::shared::config::DASHBOARD_REFRESH_MS;
use crate::shared::date_utils::format_timestamp;
use crate::shared::format::{format_percent, format_thousands};
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use crate::state::dashboard_store::{use_dashboard_store, DashboardStore};

/// Rows shown in the "latest activity" table.
const RECENT_LIMIT: usize = 5;

fn refresh(store: DashboardStore) {
    spawn_local(async move {
        store.fetch_dashboard_stats().await;
    });
    spawn_local(async move {
        store.fetch_weekly_chart().await;
    });
    spawn_local(async move {
        store.fetch_charge_points(ListParams::default()).await;
    });
}

fn online_subtitle(stats: &DashboardStats) -> Option<String> {
    stats
        .online_percent()
        .map(|_| format!("{} of total", format_percent(stats.online_percent())))
}

#[component]
pub fn OverviewDashboard() -> impl IntoView {
    let store = use_dashboard_store();

    refresh(store);

    // Periodic refresh while the page is mounted
    let alive = Arc::new(AtomicBool::new(true));
    {
        let alive = alive.clone();
        on_cleanup(move || alive.store(false, Ordering::Relaxed));
    }
    spawn_local(async move {
        loop {
            TimeoutFuture::new(DASHBOARD_REFRESH_MS).await;
            if !alive.load(Ordering::Relaxed) {
                break;
            }
            log::debug!("Refreshing dashboard overview");
            refresh(store);
        }
    });

    let stats = store.stats;
    let total = Signal::derive(move || format_thousands(stats.get().total_charge_points as i64));
    let online = Signal::derive(move || format_thousands(stats.get().online_charge_points as i64));
    let offline = Signal::derive(move || format_thousands(stats.get().offline_charge_points as i64));
    let today = Signal::derive(move || format_thousands(stats.get().today_transactions as i64));
    let offline_card_tone = Signal::derive(move || {
        let s = stats.get();
        offline_tone(s.offline_charge_points, s.total_charge_points)
    });

    let recent = move || {
        store.charge_points.with(|s| {
            let mut items = s.items.clone();
            items.sort_by(|a, b| b.last_heartbeat.cmp(&a.last_heartbeat));
            items.truncate(RECENT_LIMIT);
            items
        })
    };

    view! {
        <PageFrame page_id="d100_overview--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Dashboard"</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| refresh(store)
                        disabled=Signal::derive(move || store.charge_points.with(|s| s.loading))
                    >
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <div class="stat-grid">
                    <StatCard label="Total charge points" icon_name="charge-point" value=total />
                    <StatCard
                        label="Online"
                        icon_name="online"
                        value=online
                        tone=CardTone::Good
                        subtitle=Signal::derive(move || online_subtitle(&stats.get()))
                    />
                    <StatCard label="Offline" icon_name="offline" value=offline tone=offline_card_tone />
                    <StatCard label="Transactions today" icon_name="bolt" value=today />
                </div>

                <Card>
                    <CardHeader>
                        <h2 class="card__title">"Last 7 days"</h2>
                    </CardHeader>
                    <WeeklyChartView chart=store.weekly_chart />
                </Card>

                <Card>
                    <CardHeader>
                        <h2 class="card__title">"Latest heartbeats"</h2>
                    </CardHeader>
                    {move || store.charge_points.with(|s| s.error.clone()).map(|e| view! {
                        <div class="alert alert--error">{e}</div>
                    })}
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Code"</TableHeaderCell>
                                <TableHeaderCell>"Vendor / model"</TableHeaderCell>
                                <TableHeaderCell>"Status"</TableHeaderCell>
                                <TableHeaderCell>"Last heartbeat"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=recent
                                key=|cp| (cp.id, cp.status.clone(), cp.last_heartbeat)
                                children=move |cp| {
                                    let href = format!("/charge-points/{}", cp.id);
                                    let vendor = format!("{} {}", cp.charge_point_vendor, cp.charge_point_model);
                                    let heartbeat = format_timestamp(cp.last_heartbeat.as_ref());
                                    let code = cp.charge_point_code;
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <A href=href>{code}</A>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{vendor}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <StatusBadge kind=StatusKind::ChargePoint status=cp.status />
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{heartbeat}</TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </Card>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn online_subtitle_needs_charge_points() {
        assert_eq!(online_subtitle(&DashboardStats::default()), None);
        let stats = DashboardStats {
            total_charge_points: 4,
            online_charge_points: 3,
            offline_charge_points: 1,
            today_transactions: 0,
        };
        assert_eq!(online_subtitle(&stats).as_deref(), Some("75% of total"));
    }
}
