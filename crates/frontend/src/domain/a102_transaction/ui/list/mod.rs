use std::cmp::Ordering;

use contracts::domain::Transaction;
use contracts::enums::TransactionStatus;
use contracts::shared::api::ListParams;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::details::TransactionDetails;
use crate::layout::use_modal_state;
use crate::shared::components::ui::{StatusBadge, StatusKind};
use crate::shared::config::DEFAULT_PAGE_SIZE;
use crate::shared::date_utils::format_timestamp;
use crate::shared::format::{format_decimal, format_kwh};
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    contains_ci, create_sort_toggle, filter_list, get_sort_indicator, sort_list, SearchInput,
    Searchable, Sortable,
};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::state::dashboard_store::use_dashboard_store;

impl Searchable for Transaction {
    fn matches_filter(&self, filter: &str) -> bool {
        self.transaction_id.to_string().contains(filter)
            || self.charge_point_code().is_some_and(|c| contains_ci(c, filter))
            || self.id_tag_value().is_some_and(|t| contains_ci(t, filter))
    }
}

impl Sortable for Transaction {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "transaction_id" => self.transaction_id.cmp(&other.transaction_id),
            "charge_point" => self.charge_point_code().cmp(&other.charge_point_code()),
            "energy" => self.energy_consumed.total_cmp(&other.energy_consumed),
            "cost" => self.total_cost.total_cmp(&other.total_cost),
            "status" => self.status.cmp(&other.status),
            _ => self.start_time.cmp(&other.start_time),
        }
    }
}

/// Totals of the rows currently shown: (energy kWh, cost).
pub fn totals(items: &[Transaction]) -> (f64, f64) {
    items.iter().fold((0.0, 0.0), |(energy, cost), tx| {
        (energy + tx.energy_consumed, cost + tx.total_cost)
    })
}

/// Query for page `page` (zero based).
pub fn page_params(page: u32) -> ListParams {
    ListParams::page(DEFAULT_PAGE_SIZE, page * DEFAULT_PAGE_SIZE)
}

/// Display text of one table row.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub tx_id: i32,
    pub connector_id: i32,
    pub cp_code: String,
    pub id_tag: String,
    pub started: String,
    pub stopped: String,
    pub energy: String,
    pub cost: String,
    pub status: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(tx: &Transaction) -> Self {
        Self {
            tx_id: tx.transaction_id,
            connector_id: tx.connector_id,
            cp_code: tx.charge_point_code().unwrap_or("—").to_string(),
            id_tag: tx.id_tag_value().unwrap_or("—").to_string(),
            started: format_timestamp(tx.start_time.as_ref()),
            stopped: format_timestamp(tx.stop_time.as_ref()),
            energy: format_kwh(tx.energy_consumed),
            cost: format_decimal(tx.total_cost, 2),
            status: tx.status.clone(),
        }
    }
}

#[component]
pub fn TransactionList() -> impl IntoView {
    let store = use_dashboard_store();

    let page = RwSignal::new(0u32);
    let search = RwSignal::new(String::new());
    let status_filter = RwSignal::new(String::new());
    let sort_field = RwSignal::new("start_time".to_string());
    let sort_ascending = RwSignal::new(false);

    let details_open = use_modal_state();
    let details_id = RwSignal::new(None::<u32>);

    let load_data = move || {
        let params = if page.get_untracked() == 0 {
            ListParams::default()
        } else {
            page_params(page.get_untracked())
        };
        spawn_local(async move {
            store.fetch_transactions(params).await;
        });
    };

    Effect::new(move |_| {
        page.track();
        load_data();
    });

    let loading = Signal::derive(move || store.transactions.with(|s| s.loading));
    // A full page means there may be more on the server
    let has_next = move || store.transactions.with(|s| s.items.len() as u32 >= DEFAULT_PAGE_SIZE);

    let visible = Memo::new(move |_| {
        let status = status_filter.get();
        let mut items: Vec<Transaction> = store.transactions.with(|s| {
            s.items
                .iter()
                .filter(|tx| status.is_empty() || tx.status == status)
                .cloned()
                .collect()
        });
        items = filter_list(items, &search.get());
        sort_list(&mut items, &sort_field.get(), sort_ascending.get());
        items
    });

    let header = move |field: &'static str, label: &'static str| {
        view! {
            <TableHeaderCell>
                <div class="table__sortable-header" on:click=create_sort_toggle(field, sort_field, sort_ascending)>
                    {label}
                    <span class="table__sort-indicator">
                        {move || get_sort_indicator(&sort_field.get(), field, sort_ascending.get())}
                    </span>
                </div>
            </TableHeaderCell>
        }
    };

    view! {
        <PageFrame page_id="a102_transaction--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Transactions"</h1>
                    <Badge>{move || visible.with(|v| v.len()).to_string()}</Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_data()
                        disabled=loading
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Loading..." } else { " Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || store.transactions.with(|s| s.error.clone()).map(|e| view! {
                    <div class="alert alert--error">{e}</div>
                })}

                <div class="filter-panel">
                    <Flex gap=FlexGap::Small align=FlexAlign::Center>
                        <SearchInput
                            value=search
                            on_change=Callback::new(move |v: String| search.set(v))
                            placeholder="Transaction, charge point or tag..."
                        />
                        <Select value=status_filter>
                            <option value="">"All statuses"</option>
                            {TransactionStatus::all()
                                .into_iter()
                                .map(|s| view! { <option value=s.code()>{s.code()}</option> })
                                .collect_view()}
                        </Select>
                        <div class="filter-panel__totals">
                            {move || {
                                let (energy, cost) = visible.with(|v| totals(v));
                                format!("{} · {}", format_kwh(energy), format_decimal(cost, 2))
                            }}
                        </div>
                    </Flex>
                </div>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                {header("transaction_id", "Transaction")}
                                {header("charge_point", "Charge point")}
                                <TableHeaderCell>"Connector"</TableHeaderCell>
                                <TableHeaderCell>"ID tag"</TableHeaderCell>
                                {header("start_time", "Started")}
                                <TableHeaderCell>"Stopped"</TableHeaderCell>
                                {header("energy", "Energy")}
                                {header("cost", "Cost")}
                                {header("status", "Status")}
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || visible.get()
                                key=|tx| (tx.id, tx.status.clone(), tx.stop_time)
                                children=move |tx: Transaction| {
                                    let id = tx.id;
                                    let TransactionRow {
                                        tx_id,
                                        connector_id,
                                        cp_code,
                                        id_tag,
                                        started,
                                        stopped,
                                        energy,
                                        cost,
                                        status,
                                    } = TransactionRow::from(&tx);
                                    view! {
                                        <TableRow
                                            class="table__row--clickable"
                                            on:click=move |_| {
                                                details_id.set(Some(id));
                                                details_open.set(true);
                                            }
                                        >
                                            <TableCell>{tx_id}</TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {cp_code}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>{connector_id}</TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {id_tag}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>{started}</TableCell>
                                            <TableCell>{stopped}</TableCell>
                                            <TableCell>{energy}</TableCell>
                                            <TableCell>{cost}</TableCell>
                                            <TableCell>
                                                <StatusBadge kind=StatusKind::Transaction status=status />
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>

                    <Show when=move || !loading.get() && store.transactions.with(|s| s.is_empty())>
                        <div class="table__empty">"No transactions"</div>
                    </Show>
                </div>

                <div class="pagination">
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| page.update(|p| *p = p.saturating_sub(1))
                        disabled=Signal::derive(move || page.get() == 0 || loading.get())
                    >
                        "Previous"
                    </Button>
                    <span class="pagination__page">{move || format!("Page {}", page.get() + 1)}</span>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| page.update(|p| *p += 1)
                        disabled=Signal::derive(move || !has_next() || loading.get())
                    >
                        "Next"
                    </Button>
                </div>
            </div>

            <TransactionDetails open=details_open id=details_id />
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_sum_energy_and_cost() {
        let items = vec![
            Transaction { energy_consumed: 1.5, total_cost: 3000.0, ..Default::default() },
            Transaction { energy_consumed: 2.25, total_cost: 4500.0, ..Default::default() },
        ];
        assert_eq!(totals(&items), (3.75, 7500.0));
        assert_eq!(totals(&[]), (0.0, 0.0));
    }

    #[test]
    fn row_text_uses_preloaded_relations() {
        use contracts::domain::{ChargePoint, IdTag};
        let tx = Transaction {
            transaction_id: 42,
            connector_id: 2,
            energy_consumed: 12.5,
            total_cost: 1250.0,
            status: "Completed".into(),
            charge_point: Some(Box::new(ChargePoint {
                charge_point_code: "CP-001".into(),
                ..Default::default()
            })),
            id_tag: Some(Box::new(IdTag {
                tag: "RFID-7".into(),
                ..Default::default()
            })),
            ..Default::default()
        };
        let row = TransactionRow::from(&tx);
        assert_eq!(row.tx_id, 42);
        assert_eq!(row.connector_id, 2);
        assert_eq!(row.cp_code, "CP-001");
        assert_eq!(row.id_tag, "RFID-7");
        assert_eq!(row.energy, "12.50 kWh");
        assert_eq!(row.cost, "1\u{a0}250.00");
        assert_eq!(row.status, "Completed");
        // the source record is still usable after building the row
        assert_eq!(tx.status, "Completed");
    }

    #[test]
    fn row_text_without_relations() {
        let row = TransactionRow::from(&Transaction::default());
        assert_eq!(row.cp_code, "—");
        assert_eq!(row.id_tag, "—");
        assert_eq!(row.started, "—");
        assert_eq!(row.stopped, "—");
    }

    #[test]
    fn page_params_offset() {
        assert_eq!(page_params(0), ListParams::page(DEFAULT_PAGE_SIZE, 0));
        assert_eq!(page_params(2), ListParams::page(DEFAULT_PAGE_SIZE, 2 * DEFAULT_PAGE_SIZE));
    }

    #[test]
    fn sorts_newest_first_by_default_field() {
        use chrono::{TimeZone, Utc};
        let mut items = vec![
            Transaction { id: 1, start_time: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()), ..Default::default() },
            Transaction { id: 2, start_time: Some(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()), ..Default::default() },
        ];
        sort_list(&mut items, "start_time", false);
        assert_eq!(items[0].id, 2);
    }
}
